//! Integration tests for the notification inbox.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_mark_read_is_idempotent() {
    let app = TestApp::new();
    let customer = app.register_customer("Anika").await;
    let retailer = app.register_retailer("Marble & Co").await;
    let product = app.create_product(&retailer, "Marble Table", "150000").await;

    app.request(
        "POST",
        "/api/negotiations",
        Some(json!({ "productId": product })),
        Some(&customer.token),
    )
    .await;

    let notes = app.notifications(&retailer, "retailer").await;
    let id = notes[0]["id"].as_str().unwrap().to_string();

    for _ in 0..2 {
        let read = app
            .request(
                "PUT",
                &format!("/api/notifications/{id}/read"),
                None,
                Some(&retailer.token),
            )
            .await;
        assert_eq!(read.status, StatusCode::OK, "{:?}", read.body);
        assert_eq!(read.body["isRead"], true);
    }

    let notes = app.notifications(&retailer, "retailer").await;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["isRead"], true);
}

#[tokio::test]
async fn test_cannot_read_someone_elses_notification() {
    let app = TestApp::new();
    let customer = app.register_customer("Reva").await;
    let retailer = app.register_retailer("Marble & Co").await;
    let product = app.create_product(&retailer, "Marble Table", "150000").await;

    app.request(
        "POST",
        "/api/negotiations",
        Some(json!({ "productId": product })),
        Some(&customer.token),
    )
    .await;
    let notes = app.notifications(&retailer, "retailer").await;
    let id = notes[0]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/notifications/{id}/read"),
            None,
            Some(&customer.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let listed = app
        .request(
            "GET",
            &format!("/api/notifications?userId={}&userType=retailer", retailer.id),
            None,
            Some(&customer.token),
        )
        .await;
    assert_eq!(listed.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_requires_user_id_and_type() {
    let app = TestApp::new();
    let customer = app.register_customer("Sia").await;

    let response = app
        .request(
            "GET",
            &format!("/api/notifications?userId={}", customer.id),
            None,
            Some(&customer.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "userId and userType required");
}

#[tokio::test]
async fn test_unknown_notification_is_not_found() {
    let app = TestApp::new();
    let customer = app.register_customer("Mira").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/notifications/{}/read", uuid::Uuid::new_v4()),
            None,
            Some(&customer.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
