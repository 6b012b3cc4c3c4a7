//! Customer account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A buyer account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique customer identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login email (unique).
    pub email: String,
    /// Argon2 PHC string. Never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Phone number.
    pub contact_number: Option<String>,
    /// Default delivery address.
    pub address: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a customer.
#[derive(Debug, Clone)]
pub struct CreateCustomer {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Already-hashed password.
    pub password_hash: String,
    /// Phone number.
    pub contact_number: Option<String>,
    /// Default delivery address.
    pub address: Option<String>,
}

/// Partial profile update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomer {
    /// New display name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New phone number.
    pub contact_number: Option<String>,
    /// New address.
    pub address: Option<String>,
}

impl UpdateCustomer {
    /// Whether the update carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.contact_number.is_none()
            && self.address.is_none()
    }
}
