//! Shared test helpers for integration tests.
//!
//! Every test gets its own application over a fresh in-memory store, so
//! tests run in parallel without a database.

#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use atelier_api::AppState;
use atelier_core::config::AppConfig;
use atelier_core::error::AppError;
use atelier_database::Stores;
use atelier_database::memory::MemoryStore;
use atelier_service::{ImageGenerator, ImageRequest};

const TEST_CONFIG: &str = r#"
[database]
url = "memory://"

[auth]
jwt_secret = "integration-test-secret-0123456789"
token_ttl_hours = 1

[logging]
level = "warn"
format = "pretty"
"#;

/// Image generator that always returns the same URL.
pub struct FixedImageGenerator;

#[async_trait]
impl ImageGenerator for FixedImageGenerator {
    async fn generate(&self, _request: &ImageRequest) -> Result<String, AppError> {
        Ok("https://images.test/room.png".to_string())
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for reaching the connection registry
    pub state: AppState,
    /// Backing store for direct inspection
    pub memory: Arc<MemoryStore>,
}

/// A signed-in account.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub token: String,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let config = AppConfig::from_toml(TEST_CONFIG).expect("Failed to parse test config");
        config.validate().expect("Test config is invalid");

        let memory = Arc::new(MemoryStore::new());
        let state = AppState::new(
            config,
            Stores::memory(Arc::clone(&memory)),
            Arc::new(FixedImageGenerator),
            None,
        );
        let router = atelier_api::build_app(state.clone());

        Self {
            router,
            state,
            memory,
        }
    }

    /// Register a customer and return its id and token
    pub async fn register_customer(&self, name: &str) -> Account {
        let email = format!("{}-{}@customer.test", name.to_lowercase(), Uuid::new_v4());
        let response = self
            .request(
                "POST",
                "/api/auth/customer/register",
                Some(json!({
                    "name": name,
                    "email": email,
                    "password": "password123",
                })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Customer registration failed: {:?}",
            response.body
        );
        Self::account(&response, email)
    }

    /// Register a retailer and return its id and token
    pub async fn register_retailer(&self, business_name: &str) -> Account {
        let email = format!(
            "{}-{}@retailer.test",
            business_name.to_lowercase().replace(' ', "-"),
            Uuid::new_v4()
        );
        let response = self
            .request(
                "POST",
                "/api/auth/retailer/register",
                Some(json!({
                    "businessName": business_name,
                    "ownerName": "Owner",
                    "email": email,
                    "password": "password123",
                    "contactNumber": "+91 98200 00000",
                    "address": "Colaba, Mumbai",
                })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Retailer registration failed: {:?}",
            response.body
        );
        Self::account(&response, email)
    }

    fn account(response: &TestResponse, email: String) -> Account {
        Account {
            id: response.uuid_at("/user/id"),
            email,
            token: response.body["token"]
                .as_str()
                .expect("No token in session response")
                .to_string(),
        }
    }

    /// List a product as `retailer` and return its id
    pub async fn create_product(&self, retailer: &Account, name: &str, price: &str) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/products",
                Some(json!({
                    "name": name,
                    "category": "Furniture",
                    "price": price,
                    "stockQuantity": 10,
                })),
                Some(&retailer.token),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Product creation failed: {:?}",
            response.body
        );
        response.uuid_at("/id")
    }

    /// Notifications addressed to `account` as `user_type`
    pub async fn notifications(&self, account: &Account, user_type: &str) -> Vec<Value> {
        let response = self
            .request(
                "GET",
                &format!(
                    "/api/notifications?userId={}&userType={user_type}",
                    account.id
                ),
                None,
                Some(&account.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body.as_array().cloned().unwrap_or_default()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// UUID at a JSON pointer, e.g. `/user/id`
    pub fn uuid_at(&self, pointer: &str) -> Uuid {
        let raw = self
            .body
            .pointer(pointer)
            .and_then(Value::as_str)
            .unwrap_or_else(|| panic!("No string at {pointer} in {:?}", self.body));
        Uuid::parse_str(raw).expect("Not a UUID")
    }

    /// Decimal at a JSON pointer; amounts serialize as strings
    pub fn decimal_at(&self, pointer: &str) -> Decimal {
        decimal(&self.body, pointer)
    }
}

/// Decimal at a JSON pointer inside any value
pub fn decimal(value: &Value, pointer: &str) -> Decimal {
    let raw = value
        .pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("No amount at {pointer} in {value:?}"));
    Decimal::from_str(raw).expect("Not a decimal")
}
