//! Integration tests for checkout and order fan-out.

mod helpers;

use http::StatusCode;
use rust_decimal::Decimal;
use serde_json::json;

use helpers::{Account, TestApp};

async fn place_two_retailer_order(
    app: &TestApp,
    customer: &Account,
    r1: &Account,
    r2: &Account,
) -> helpers::TestResponse {
    let lamp = app.create_product(r1, "Brass Lamp", "1200").await;
    let rug = app.create_product(r2, "Silk Rug", "8000").await;

    app.request(
        "POST",
        "/api/orders",
        Some(json!({
            "order": {
                "customerId": customer.id,
                "deliveryAddress": "12 Marine Drive, Mumbai",
            },
            "items": [
                {
                    "productId": lamp,
                    "productName": "Brass Lamp",
                    "retailerId": r1.id,
                    "quantity": 2,
                    "price": "1200",
                },
                {
                    "productId": rug,
                    "productName": "Silk Rug",
                    "retailerId": r2.id,
                    "quantity": 1,
                    "price": "8000",
                },
            ],
        })),
        Some(&customer.token),
    )
    .await
}

#[tokio::test]
async fn test_place_order_computes_total_and_clears_cart() {
    let app = TestApp::new();
    let customer = app.register_customer("Meera").await;
    let r1 = app.register_retailer("Luxe Lights").await;
    let r2 = app.register_retailer("Persian Weaves").await;

    let vase = app.create_product(&r1, "Crystal Vase", "450").await;
    let added = app
        .request(
            "POST",
            "/api/cart",
            Some(json!({ "productId": vase, "quantity": 1 })),
            Some(&customer.token),
        )
        .await;
    assert_eq!(added.status, StatusCode::CREATED);

    let response = place_two_retailer_order(&app, &customer, &r1, &r2).await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.decimal_at("/totalAmount"), Decimal::new(10400, 0));
    assert_eq!(response.body["orderStatus"], "pending");
    assert_eq!(response.body["paymentStatus"], "pending");
    let items = response.body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(helpers::decimal(&items[0], "/subtotal"), Decimal::new(2400, 0));

    let cart = app
        .request(
            "GET",
            &format!("/api/cart?customerId={}", customer.id),
            None,
            Some(&customer.token),
        )
        .await;
    assert_eq!(cart.status, StatusCode::OK);
    assert!(cart.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_each_retailer_gets_one_notification() {
    let app = TestApp::new();
    let customer = app.register_customer("Arjun").await;
    let r1 = app.register_retailer("Luxe Lights").await;
    let r2 = app.register_retailer("Persian Weaves").await;

    let response = place_two_retailer_order(&app, &customer, &r1, &r2).await;
    assert_eq!(response.status, StatusCode::CREATED);
    let order_id = response.uuid_at("/id");

    for (retailer, product) in [(&r1, "Brass Lamp"), (&r2, "Silk Rug")] {
        let notes = app.notifications(retailer, "retailer").await;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0]["type"], "order");
        assert_eq!(notes[0]["title"], "New Order Received");
        assert_eq!(notes[0]["relatedId"], order_id.to_string());
        assert!(notes[0]["message"].as_str().unwrap().contains(product));
        assert_eq!(notes[0]["isRead"], false);
    }

    assert!(app.notifications(&customer, "customer").await.is_empty());
}

#[tokio::test]
async fn test_retailer_lists_orders_containing_its_items() {
    let app = TestApp::new();
    let customer = app.register_customer("Kabir").await;
    let r1 = app.register_retailer("Luxe Lights").await;
    let r2 = app.register_retailer("Persian Weaves").await;
    let outsider = app.register_retailer("Teak House").await;

    place_two_retailer_order(&app, &customer, &r1, &r2).await;

    let listed = app
        .request(
            "GET",
            &format!("/api/orders?retailerId={}", r1.id),
            None,
            Some(&r1.token),
        )
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body.as_array().unwrap().len(), 1);

    let listed = app
        .request("GET", "/api/orders", None, Some(&outsider.token))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert!(listed.body.as_array().unwrap().is_empty());

    let foreign = app
        .request(
            "GET",
            &format!("/api/orders?retailerId={}", r1.id),
            None,
            Some(&outsider.token),
        )
        .await;
    assert_eq!(foreign.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_cannot_order_for_another_customer() {
    let app = TestApp::new();
    let customer = app.register_customer("Ira").await;
    let other = app.register_customer("Dev").await;
    let r1 = app.register_retailer("Luxe Lights").await;
    let r2 = app.register_retailer("Persian Weaves").await;

    let response = place_two_retailer_order(&app, &other, &r1, &r2).await;
    assert_eq!(response.status, StatusCode::CREATED);

    let forged = app
        .request(
            "POST",
            "/api/orders",
            Some(json!({
                "order": { "customerId": other.id, "deliveryAddress": "Somewhere 1" },
                "items": [{
                    "productId": uuid::Uuid::new_v4(),
                    "productName": "Anything",
                    "retailerId": r1.id,
                    "quantity": 1,
                    "price": "10",
                }],
            })),
            Some(&customer.token),
        )
        .await;
    assert_eq!(forged.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_empty_order_is_rejected() {
    let app = TestApp::new();
    let customer = app.register_customer("Tara").await;

    let response = app
        .request(
            "POST",
            "/api/orders",
            Some(json!({
                "order": { "customerId": customer.id, "deliveryAddress": "Bandra" },
                "items": [],
            })),
            Some(&customer.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Order must contain at least one item");
}

#[tokio::test]
async fn test_status_update_notifies_customer() {
    let app = TestApp::new();
    let customer = app.register_customer("Nina").await;
    let r1 = app.register_retailer("Luxe Lights").await;
    let r2 = app.register_retailer("Persian Weaves").await;

    let placed = place_two_retailer_order(&app, &customer, &r1, &r2).await;
    let order_id = placed.uuid_at("/id");

    let updated = app
        .request(
            "PUT",
            &format!("/api/orders/{order_id}"),
            Some(json!({ "orderStatus": "shipped" })),
            Some(&r1.token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK, "{:?}", updated.body);
    assert_eq!(updated.body["orderStatus"], "shipped");

    let notes = app.notifications(&customer, "customer").await;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["title"], "Order Status Updated");
    assert_eq!(notes[0]["message"], "Your order status is now: shipped");
}

#[tokio::test]
async fn test_unknown_order_status_is_a_bad_request() {
    let app = TestApp::new();
    let customer = app.register_customer("Ira").await;
    let r1 = app.register_retailer("Luxe Lights").await;
    let r2 = app.register_retailer("Persian Weaves").await;

    let placed = place_two_retailer_order(&app, &customer, &r1, &r2).await;
    let order_id = placed.uuid_at("/id");

    let response = app
        .request(
            "PUT",
            &format!("/api/orders/{order_id}"),
            Some(json!({ "orderStatus": "teleported" })),
            Some(&r1.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string(), "{:?}", response.body);
    assert!(response.body["message"].is_string(), "{:?}", response.body);

    let fetched = app
        .request("GET", &format!("/api/orders/{order_id}"), None, Some(&customer.token))
        .await;
    assert_eq!(fetched.body["orderStatus"], "pending");
    assert!(app.notifications(&customer, "customer").await.is_empty());
}
