//! Response DTOs.
//!
//! Resource endpoints return the entity itself; these cover the
//! envelopes that carry more than one thing.

use chrono::{DateTime, Utc};
use serde::Serialize;

use atelier_entity::user::{Customer, Retailer};
use atelier_service::{AuthUser, Session};

/// Plain `{message}` acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{success: true}` after a delete.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// `{removed}` after clearing a cart.
#[derive(Debug, Clone, Serialize)]
pub struct ClearedResponse {
    pub removed: u64,
}

/// Login or registration result.
///
/// Registration also echoes the created account under `customer` or
/// `retailer`; login leaves both out.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: AuthUser,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retailer: Option<Retailer>,
    pub message: String,
}

impl SessionResponse {
    /// A customer session; `echo` keeps the account in the body.
    pub fn customer(session: Session<Customer>, echo: bool, message: &str) -> Self {
        Self {
            user: session.user,
            token: session.token.token,
            expires_at: session.token.expires_at,
            customer: echo.then_some(session.account),
            retailer: None,
            message: message.to_string(),
        }
    }

    /// A retailer session; `echo` keeps the account in the body.
    pub fn retailer(session: Session<Retailer>, echo: bool, message: &str) -> Self {
        Self {
            user: session.user,
            token: session.token.token,
            expires_at: session.token.expires_at,
            customer: None,
            retailer: echo.then_some(session.account),
            message: message.to_string(),
        }
    }
}

/// `GET /api/auth/me`
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub user: AuthUser,
}

/// `GET /api/health`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// `GET /api/health/detailed`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedHealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// `connected`, `unreachable` or `memory`.
    pub database: String,
    pub ws_connections: usize,
    pub online_identities: usize,
}
