//! Integration tests for negotiation threads.

mod helpers;

use http::StatusCode;
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

use helpers::{Account, TestApp};

async fn open(app: &TestApp, customer: &Account, retailer: &Account) -> Uuid {
    let product = app.create_product(retailer, "Walnut Sideboard", "64000").await;
    let response = app
        .request(
            "POST",
            "/api/negotiations",
            Some(json!({ "productId": product })),
            Some(&customer.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["status"], "active");
    assert_eq!(response.uuid_at("/retailerId"), retailer.id);
    response.uuid_at("/id")
}

#[tokio::test]
async fn test_open_notifies_retailer() {
    let app = TestApp::new();
    let customer = app.register_customer("Aisha").await;
    let retailer = app.register_retailer("Heritage Woods").await;
    let negotiation = open(&app, &customer, &retailer).await;

    let notes = app.notifications(&retailer, "retailer").await;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["type"], "negotiation");
    assert_eq!(notes[0]["relatedId"], negotiation.to_string());
}

#[tokio::test]
async fn test_offer_moves_thread_to_pending() {
    let app = TestApp::new();
    let customer = app.register_customer("Zoya").await;
    let retailer = app.register_retailer("Heritage Woods").await;
    let negotiation = open(&app, &customer, &retailer).await;

    let sent = app
        .request(
            "POST",
            &format!("/api/negotiations/{negotiation}/messages"),
            Some(json!({ "message": "Would you take 58000?", "offerPrice": "58000" })),
            Some(&customer.token),
        )
        .await;
    assert_eq!(sent.status, StatusCode::CREATED, "{:?}", sent.body);
    assert_eq!(sent.body["senderType"], "customer");
    assert_eq!(sent.decimal_at("/offerPrice"), Decimal::new(58000, 0));

    let reply = app
        .request(
            "POST",
            &format!("/api/negotiations/{negotiation}/messages"),
            Some(json!({ "message": "Meet me at 60000" })),
            Some(&retailer.token),
        )
        .await;
    assert_eq!(reply.status, StatusCode::CREATED);

    let thread = app
        .request(
            "GET",
            &format!("/api/negotiations/{negotiation}"),
            None,
            Some(&retailer.token),
        )
        .await;
    assert_eq!(thread.body["status"], "pending");

    let messages = app
        .request(
            "GET",
            &format!("/api/negotiations/{negotiation}/messages"),
            None,
            Some(&retailer.token),
        )
        .await;
    assert_eq!(messages.status, StatusCode::OK);
    assert_eq!(messages.body.as_array().unwrap().len(), 2);

    // customer heard about the reply
    let notes = app.notifications(&customer, "customer").await;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["title"], "New Message");
}

#[tokio::test]
async fn test_outsiders_cannot_read_thread() {
    let app = TestApp::new();
    let customer = app.register_customer("Kiara").await;
    let retailer = app.register_retailer("Heritage Woods").await;
    let other = app.register_customer("Yash").await;
    let negotiation = open(&app, &customer, &retailer).await;

    let response = app
        .request(
            "GET",
            &format!("/api/negotiations/{negotiation}/messages"),
            None,
            Some(&other.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_empty_message_is_rejected() {
    let app = TestApp::new();
    let customer = app.register_customer("Ishaan").await;
    let retailer = app.register_retailer("Heritage Woods").await;
    let negotiation = open(&app, &customer, &retailer).await;

    let response = app
        .request(
            "POST",
            &format!("/api/negotiations/{negotiation}/messages"),
            Some(json!({ "message": "   " })),
            Some(&customer.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_acceptance_notifies_customer() {
    let app = TestApp::new();
    let customer = app.register_customer("Ritu").await;
    let retailer = app.register_retailer("Heritage Woods").await;
    let negotiation = open(&app, &customer, &retailer).await;

    let accepted = app
        .request(
            "PUT",
            &format!("/api/negotiations/{negotiation}"),
            Some(json!({ "status": "accepted" })),
            Some(&retailer.token),
        )
        .await;
    assert_eq!(accepted.status, StatusCode::OK, "{:?}", accepted.body);
    assert_eq!(accepted.body["status"], "accepted");

    let notes = app.notifications(&customer, "customer").await;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["title"], "Negotiation accepted");

    let listed = app
        .request(
            "GET",
            &format!("/api/negotiations?retailerId={}", retailer.id),
            None,
            Some(&retailer.token),
        )
        .await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_sender_comes_from_caller_not_payload() {
    let app = TestApp::new();
    let customer = app.register_customer("Rhea").await;
    let retailer = app.register_retailer("Heritage Woods").await;
    let negotiation = open(&app, &customer, &retailer).await;

    let sent = app
        .request(
            "POST",
            &format!("/api/negotiations/{negotiation}/messages"),
            Some(json!({
                "message": "Final offer accepted on my side",
                "senderId": retailer.id,
                "senderType": "retailer",
            })),
            Some(&customer.token),
        )
        .await;
    assert_eq!(sent.status, StatusCode::CREATED, "{:?}", sent.body);
    assert_eq!(sent.body["senderType"], "customer");
    assert_eq!(sent.uuid_at("/senderId"), customer.id);

    let messages = app
        .request(
            "GET",
            &format!("/api/negotiations/{negotiation}/messages"),
            None,
            Some(&customer.token),
        )
        .await;
    let stored = &messages.body.as_array().unwrap()[0];
    assert_eq!(stored["senderType"], "customer");
    assert_eq!(stored["senderId"], customer.id.to_string());

    // The retailer is the counterparty, so only it hears about the message.
    assert_eq!(app.notifications(&retailer, "retailer").await.len(), 2);
    assert!(app.notifications(&customer, "customer").await.is_empty());
}
