//! Integration tests for WebSocket push and health endpoints.

mod helpers;

use std::net::SocketAddr;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use http::StatusCode;
use serde_json::{Value, json};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use helpers::{Account, TestApp};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Serve the app on an ephemeral port.
async fn serve(app: &TestApp) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router.clone();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn connect(addr: SocketAddr) -> Client {
    let (client, _) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws"))
        .await
        .expect("WebSocket handshake failed");
    client
}

async fn send(client: &mut Client, frame: Value) {
    client
        .send(Message::Text(frame.to_string().into()))
        .await
        .unwrap();
}

/// Next JSON text frame, failing after five seconds.
async fn recv(client: &mut Client) -> Value {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), client.next())
            .await
            .expect("Timed out waiting for a frame")
            .expect("Socket closed")
            .unwrap();
        if let Message::Text(text) = frame {
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}

async fn authenticate(client: &mut Client, account: &Account, user_type: &str) {
    send(
        client,
        json!({ "type": "auth", "userId": account.id, "userType": user_type }),
    )
    .await;
    assert_eq!(recv(client).await["type"], "auth_success");
}

#[tokio::test]
async fn test_auth_and_ping() {
    let app = TestApp::new();
    let addr = serve(&app).await;
    let customer = app.register_customer("Ahana").await;

    let mut client = connect(addr).await;
    authenticate(&mut client, &customer, "customer").await;

    send(&mut client, json!({ "type": "ping" })).await;
    assert_eq!(recv(&mut client).await["type"], "pong");

    assert_eq!(app.state.registry.identity_count(), 1);
}

#[tokio::test]
async fn test_malformed_frame_gets_error() {
    let app = TestApp::new();
    let addr = serve(&app).await;

    let mut client = connect(addr).await;
    client
        .send(Message::Text("not json".to_string().into()))
        .await
        .unwrap();

    let reply = recv(&mut client).await;
    assert_eq!(reply["type"], "error");
    assert_eq!(reply["code"], "INVALID_MESSAGE");
}

#[tokio::test]
async fn test_token_must_match_claimed_identity() {
    let app = TestApp::new();
    let addr = serve(&app).await;
    let customer = app.register_customer("Jiya").await;
    let retailer = app.register_retailer("Bronze Works").await;

    let mut client = connect(addr).await;
    send(
        &mut client,
        json!({
            "type": "auth",
            "userId": customer.id,
            "userType": "customer",
            "token": retailer.token,
        }),
    )
    .await;

    let reply = recv(&mut client).await;
    assert_eq!(reply["type"], "error");
    assert_eq!(reply["code"], "AUTH_FAILED");
    assert_eq!(app.state.registry.identity_count(), 0);
}

#[tokio::test]
async fn test_retailer_receives_only_its_order_lines() {
    let app = TestApp::new();
    let addr = serve(&app).await;
    let customer = app.register_customer("Shaurya").await;
    let r1 = app.register_retailer("Bronze Works").await;
    let r2 = app.register_retailer("Ivory Linen").await;
    let statue = app.create_product(&r1, "Bronze Statue", "30000").await;
    let sheets = app.create_product(&r2, "Linen Sheets", "7000").await;

    let mut socket = connect(addr).await;
    authenticate(&mut socket, &r1, "retailer").await;

    let placed = app
        .request(
            "POST",
            "/api/orders",
            Some(json!({
                "order": { "customerId": customer.id, "deliveryAddress": "Alibaug" },
                "items": [
                    {
                        "productId": statue,
                        "productName": "Bronze Statue",
                        "retailerId": r1.id,
                        "quantity": 1,
                        "price": "30000",
                    },
                    {
                        "productId": sheets,
                        "productName": "Linen Sheets",
                        "retailerId": r2.id,
                        "quantity": 2,
                        "price": "7000",
                    },
                ],
            })),
            Some(&customer.token),
        )
        .await;
    assert_eq!(placed.status, StatusCode::CREATED, "{:?}", placed.body);

    let push = recv(&mut socket).await;
    assert_eq!(push["type"], "new_order");
    assert_eq!(push["order"]["id"], placed.body["id"]);
    let items = push["order"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["retailerId"], r1.id.to_string());
}

#[tokio::test]
async fn test_customer_receives_new_bid() {
    let app = TestApp::new();
    let addr = serve(&app).await;
    let customer = app.register_customer("Tanvi").await;
    let retailer = app.register_retailer("Bronze Works").await;
    let product = app.create_product(&retailer, "Bronze Urn", "12000").await;

    let auction = app
        .request(
            "POST",
            "/api/auctions",
            Some(json!({
                "productId": product,
                "startPrice": "11000",
                "endDate": "2099-01-01T00:00:00Z",
            })),
            Some(&customer.token),
        )
        .await;
    let auction_id = auction.uuid_at("/id");

    let mut socket = connect(addr).await;
    authenticate(&mut socket, &customer, "customer").await;

    app.request(
        "POST",
        &format!("/api/auctions/{auction_id}/bids"),
        Some(json!({ "bidAmount": "10500" })),
        Some(&retailer.token),
    )
    .await;

    let push = recv(&mut socket).await;
    assert_eq!(push["type"], "new_bid");
    assert_eq!(push["auctionId"], auction_id.to_string());
    assert_eq!(push["bid"]["bidAmount"], "10500.00");
}

#[tokio::test]
async fn test_closed_socket_is_unregistered() {
    let app = TestApp::new();
    let addr = serve(&app).await;
    let customer = app.register_customer("Vihaan").await;

    let mut client = connect(addr).await;
    authenticate(&mut client, &customer, "customer").await;
    client.close(None).await.unwrap();

    let registry = &app.state.registry;
    for _ in 0..50 {
        if registry.connection_count() == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(registry.connection_count(), 0);
    assert_eq!(registry.identity_count(), 0);
}

#[tokio::test]
async fn test_evicted_socket_gets_close_frame() {
    let app = TestApp::new();
    let addr = serve(&app).await;
    let customer = app.register_customer("Ishaan").await;
    let limit = app.state.config.realtime.max_connections_per_identity;

    let mut oldest = connect(addr).await;
    authenticate(&mut oldest, &customer, "customer").await;
    let mut others = Vec::new();
    for _ in 0..limit {
        let mut client = connect(addr).await;
        authenticate(&mut client, &customer, "customer").await;
        others.push(client);
    }

    let frame = tokio::time::timeout(Duration::from_secs(5), oldest.next())
        .await
        .expect("Timed out waiting for the close frame")
        .expect("Socket ended without a frame")
        .expect("Socket dropped without a close handshake");
    assert!(matches!(frame, Message::Close(_)), "{frame:?}");
    assert_eq!(app.state.registry.identity_count(), 1);
}

#[tokio::test]
async fn test_ws_upgrade_without_handshake_headers() {
    let app = TestApp::new();

    let response = app.request("GET", "/ws", None, None).await;

    assert!(
        response.status == StatusCode::BAD_REQUEST
            || response.status == StatusCode::UPGRADE_REQUIRED,
        "Expected 400 or 426, got {}",
        response.status
    );
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_detailed_health_check() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health/detailed", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["database"], "memory");
    assert_eq!(response.body["wsConnections"], 0);
}
