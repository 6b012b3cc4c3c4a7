//! Integration tests for reverse auctions and bidding.

mod helpers;

use http::StatusCode;
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

use helpers::{Account, TestApp};

async fn open_auction(app: &TestApp, customer: &Account, retailer: &Account) -> Uuid {
    let product = app.create_product(retailer, "Murano Chandelier", "90000").await;
    let response = app
        .request(
            "POST",
            "/api/auctions",
            Some(json!({
                "productId": product,
                "startPrice": "75000",
                "endDate": "2099-01-01T00:00:00Z",
            })),
            Some(&customer.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["status"], "active");
    assert_eq!(response.uuid_at("/retailerId"), retailer.id);
    response.uuid_at("/id")
}

async fn bid(
    app: &TestApp,
    retailer: &Account,
    auction: Uuid,
    amount: &str,
) -> helpers::TestResponse {
    app.request(
        "POST",
        &format!("/api/auctions/{auction}/bids"),
        Some(json!({ "bidAmount": amount })),
        Some(&retailer.token),
    )
    .await
}

#[tokio::test]
async fn test_bids_persist_and_track_highest() {
    let app = TestApp::new();
    let customer = app.register_customer("Anaya").await;
    let r1 = app.register_retailer("Glass Atelier").await;
    let r2 = app.register_retailer("Venetian Home").await;
    let auction = open_auction(&app, &customer, &r1).await;

    assert_eq!(bid(&app, &r1, auction, "72000").await.status, StatusCode::CREATED);
    assert_eq!(bid(&app, &r2, auction, "70500").await.status, StatusCode::CREATED);

    let fetched = app
        .request("GET", &format!("/api/auctions/{auction}"), None, None)
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["bids"].as_array().unwrap().len(), 2);
    assert_eq!(fetched.body["numberOfBidders"], 2);
    assert_eq!(fetched.decimal_at("/currentHighestBid"), Decimal::new(72000, 0));
    assert_eq!(fetched.uuid_at("/currentBidderId"), r1.id);

    let notes = app.notifications(&customer, "customer").await;
    assert_eq!(notes.len(), 2);
    assert!(notes.iter().all(|n| n["type"] == "auction"));
}

#[tokio::test]
async fn test_simultaneous_bids_both_persist() {
    let app = TestApp::new();
    let customer = app.register_customer("Farah").await;
    let r1 = app.register_retailer("Glass Atelier").await;
    let r2 = app.register_retailer("Venetian Home").await;
    let auction = open_auction(&app, &customer, &r1).await;

    let (a, b) = tokio::join!(
        bid(&app, &r1, auction, "70000"),
        bid(&app, &r2, auction, "71000"),
    );
    assert_eq!(a.status, StatusCode::CREATED);
    assert_eq!(b.status, StatusCode::CREATED);

    let fetched = app
        .request("GET", &format!("/api/auctions/{auction}"), None, None)
        .await;
    assert_eq!(fetched.body["bids"].as_array().unwrap().len(), 2);
    assert_eq!(fetched.decimal_at("/currentHighestBid"), Decimal::new(71000, 0));
    assert_eq!(fetched.uuid_at("/currentBidderId"), r2.id);
}

#[tokio::test]
async fn test_customers_cannot_bid() {
    let app = TestApp::new();
    let customer = app.register_customer("Rohan").await;
    let retailer = app.register_retailer("Glass Atelier").await;
    let auction = open_auction(&app, &customer, &retailer).await;

    let response = bid(&app, &customer, auction, "70000").await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_non_positive_bid_is_rejected() {
    let app = TestApp::new();
    let customer = app.register_customer("Sana").await;
    let retailer = app.register_retailer("Glass Atelier").await;
    let auction = open_auction(&app, &customer, &retailer).await;

    let response = bid(&app, &retailer, auction, "0").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_close_declares_winner_and_stops_bidding() {
    let app = TestApp::new();
    let customer = app.register_customer("Vikram").await;
    let r1 = app.register_retailer("Glass Atelier").await;
    let r2 = app.register_retailer("Venetian Home").await;
    let auction = open_auction(&app, &customer, &r1).await;
    bid(&app, &r1, auction, "71000").await;

    let not_a_bidder = app
        .request(
            "POST",
            &format!("/api/auctions/{auction}/close"),
            Some(json!({ "winnerId": r2.id })),
            Some(&customer.token),
        )
        .await;
    assert_eq!(not_a_bidder.status, StatusCode::BAD_REQUEST);

    let closed = app
        .request(
            "POST",
            &format!("/api/auctions/{auction}/close"),
            Some(json!({ "winnerId": r1.id })),
            Some(&customer.token),
        )
        .await;
    assert_eq!(closed.status, StatusCode::OK, "{:?}", closed.body);
    assert_eq!(closed.body["status"], "ended");
    assert_eq!(closed.uuid_at("/winnerId"), r1.id);

    let late = bid(&app, &r2, auction, "65000").await;
    assert_eq!(late.status, StatusCode::BAD_REQUEST);
    assert_eq!(late.body["message"], "Auction is not active");

    let fetched = app
        .request("GET", &format!("/api/auctions/{auction}"), None, None)
        .await;
    assert_eq!(fetched.body["bids"].as_array().unwrap().len(), 1);

    let won = app.notifications(&r1, "retailer").await;
    assert_eq!(won.len(), 1);
    assert_eq!(won[0]["title"], "You Won an Auction!");
}

#[tokio::test]
async fn test_only_owner_can_close() {
    let app = TestApp::new();
    let customer = app.register_customer("Leela").await;
    let intruder = app.register_customer("Omar").await;
    let retailer = app.register_retailer("Glass Atelier").await;
    let auction = open_auction(&app, &customer, &retailer).await;
    bid(&app, &retailer, auction, "70000").await;

    let response = app
        .request(
            "POST",
            &format!("/api/auctions/{auction}/close"),
            Some(json!({ "winnerId": retailer.id })),
            Some(&intruder.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_active_listing_by_customer() {
    let app = TestApp::new();
    let customer = app.register_customer("Priya").await;
    let retailer = app.register_retailer("Glass Atelier").await;
    open_auction(&app, &customer, &retailer).await;
    open_auction(&app, &customer, &retailer).await;

    let listed = app
        .request(
            "GET",
            &format!("/api/auctions?customerId={}&active=true", customer.id),
            None,
            None,
        )
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body.as_array().unwrap().len(), 2);
}
