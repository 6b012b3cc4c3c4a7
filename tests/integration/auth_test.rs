//! Integration tests for registration, login and bearer authentication.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_customer_register_returns_session() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/customer/register",
            Some(json!({
                "name": "Meher Kapoor",
                "email": "Meher@Example.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(response.body["user"]["userType"], "customer");
    assert_eq!(response.body["user"]["email"], "meher@example.com");
    assert!(response.body["customer"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = TestApp::new();
    let customer = app.register_customer("Asha").await;

    let response = app
        .request(
            "POST",
            "/api/auth/customer/register",
            Some(json!({
                "name": "Asha Again",
                "email": customer.email.to_uppercase(),
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["message"], "Email already registered");
}

#[tokio::test]
async fn test_short_password_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/customer/register",
            Some(json!({
                "name": "Tiny",
                "email": "tiny@example.com",
                "password": "short",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_retailer_register_lists_missing_fields() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/retailer/register",
            Some(json!({
                "businessName": "Gilded Frames",
                "email": "frames@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["message"],
        "Required: Owner name, Contact number, Address"
    );
}

#[tokio::test]
async fn test_login_success_and_me() {
    let app = TestApp::new();
    let retailer = app.register_retailer("Gilded Frames").await;

    let login = app
        .request(
            "POST",
            "/api/auth/retailer/login",
            Some(json!({ "email": retailer.email, "password": "password123" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK, "{:?}", login.body);
    assert_eq!(login.body["message"], "Login successful");
    let token = login.body["token"].as_str().unwrap().to_string();

    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.uuid_at("/user/id"), retailer.id);
    assert_eq!(me.body["user"]["userType"], "retailer");
    assert_eq!(me.body["user"]["businessName"], "Gilded Frames");
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = TestApp::new();
    let customer = app.register_customer("Nikhil").await;

    let response = app
        .request(
            "POST",
            "/api/auth/customer/login",
            Some(json!({ "email": customer.email, "password": "wrongpassword" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_customer_cannot_use_retailer_login() {
    let app = TestApp::new();
    let customer = app.register_customer("Parth").await;

    let response = app
        .request(
            "POST",
            "/api/auth/retailer/login",
            Some(json!({ "email": customer.email, "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_invalid_token() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/auth/me", None, Some("invalid.token.here"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_is_private_to_its_owner() {
    let app = TestApp::new();
    let owner = app.register_customer("Alia").await;
    let other = app.register_customer("Ranveer").await;

    let own = app
        .request(
            "PUT",
            &format!("/api/customers/{}", owner.id),
            Some(json!({ "address": "Juhu, Mumbai" })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(own.status, StatusCode::OK, "{:?}", own.body);
    assert_eq!(own.body["address"], "Juhu, Mumbai");

    let foreign = app
        .request(
            "PUT",
            &format!("/api/customers/{}", owner.id),
            Some(json!({ "address": "Elsewhere" })),
            Some(&other.token),
        )
        .await;
    assert_eq!(foreign.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_logout_is_acknowledged() {
    let app = TestApp::new();

    let response = app.request("POST", "/api/auth/logout", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Logout successful");
}
