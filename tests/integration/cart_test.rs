//! Integration tests for the shopping cart.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_add_list_update_remove() {
    let app = TestApp::new();
    let customer = app.register_customer("Diya").await;
    let retailer = app.register_retailer("Loom Studio").await;
    let cushion = app.create_product(&retailer, "Silk Cushion", "2500").await;
    let throw = app.create_product(&retailer, "Cashmere Throw", "9000").await;

    let first = app
        .request(
            "POST",
            "/api/cart",
            Some(json!({ "productId": cushion, "quantity": 2 })),
            Some(&customer.token),
        )
        .await;
    assert_eq!(first.status, StatusCode::CREATED, "{:?}", first.body);
    let cushion_line = first.uuid_at("/id");

    let second = app
        .request(
            "POST",
            "/api/cart",
            Some(json!({ "productId": throw })),
            Some(&customer.token),
        )
        .await;
    assert_eq!(second.status, StatusCode::CREATED);
    assert_eq!(second.body["quantity"], 1);

    let path = format!("/api/cart?customerId={}", customer.id);
    let listed = app.request("GET", &path, None, Some(&customer.token)).await;
    assert_eq!(listed.status, StatusCode::OK);
    let lines = listed.body.as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|l| l["product"]["name"].is_string()));

    let updated = app
        .request(
            "PUT",
            &format!("/api/cart/{cushion_line}"),
            Some(json!({ "quantity": 4 })),
            Some(&customer.token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["quantity"], 4);

    let removed = app
        .request(
            "DELETE",
            &format!("/api/cart/{cushion_line}"),
            None,
            Some(&customer.token),
        )
        .await;
    assert_eq!(removed.status, StatusCode::OK);
    assert_eq!(removed.body["success"], true);

    let cleared = app.request("DELETE", &path, None, Some(&customer.token)).await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert_eq!(cleared.body["removed"], 1);

    let listed = app.request("GET", &path, None, Some(&customer.token)).await;
    assert!(listed.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_zero_quantity_is_rejected() {
    let app = TestApp::new();
    let customer = app.register_customer("Neel").await;
    let retailer = app.register_retailer("Loom Studio").await;
    let cushion = app.create_product(&retailer, "Silk Cushion", "2500").await;

    let response = app
        .request(
            "POST",
            "/api/cart",
            Some(json!({ "productId": cushion, "quantity": 0 })),
            Some(&customer.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let app = TestApp::new();
    let customer = app.register_customer("Avni").await;

    let response = app
        .request(
            "POST",
            "/api/cart",
            Some(json!({ "productId": uuid::Uuid::new_v4() })),
            Some(&customer.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_customer_id_is_required_and_scoped() {
    let app = TestApp::new();
    let customer = app.register_customer("Kavya").await;
    let other = app.register_customer("Reyansh").await;

    let missing = app
        .request("GET", "/api/cart", None, Some(&customer.token))
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body["message"], "customerId is required");

    let foreign = app
        .request(
            "GET",
            &format!("/api/cart?customerId={}", other.id),
            None,
            Some(&customer.token),
        )
        .await;
    assert_eq!(foreign.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_retailers_have_no_cart() {
    let app = TestApp::new();
    let retailer = app.register_retailer("Loom Studio").await;
    let cushion = app.create_product(&retailer, "Silk Cushion", "2500").await;

    let response = app
        .request(
            "POST",
            "/api/cart",
            Some(json!({ "productId": cushion })),
            Some(&retailer.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_adding_same_product_twice_keeps_one_line() {
    let app = TestApp::new();
    let customer = app.register_customer("Kabir").await;
    let retailer = app.register_retailer("Loom Studio").await;
    let cushion = app.create_product(&retailer, "Silk Cushion", "2500").await;

    let mut line_ids = Vec::new();
    for quantity in [1, 2] {
        let added = app
            .request(
                "POST",
                "/api/cart",
                Some(json!({ "productId": cushion, "quantity": quantity })),
                Some(&customer.token),
            )
            .await;
        assert!(added.status.is_success(), "{:?}", added.body);
        line_ids.push(added.uuid_at("/id"));
    }
    assert_eq!(line_ids[0], line_ids[1]);

    let path = format!("/api/cart?customerId={}", customer.id);
    let listed = app.request("GET", &path, None, Some(&customer.token)).await;
    let lines = listed.body.as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["quantity"], 3);
}
