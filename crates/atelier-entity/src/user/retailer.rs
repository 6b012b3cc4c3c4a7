//! Retailer account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A seller account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Retailer {
    /// Unique retailer identifier.
    pub id: Uuid,
    /// Registered business name.
    pub business_name: String,
    /// Owner's full name.
    pub owner_name: String,
    /// Login email (unique).
    pub email: String,
    /// Argon2 PHC string. Never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Phone number.
    pub contact_number: String,
    /// Business address.
    pub address: String,
    /// GST registration number.
    pub gst_number: Option<String>,
    /// PAN number.
    pub pan_number: Option<String>,
    /// Logo image URL.
    pub logo_url: Option<String>,
    /// Free-form description.
    pub about: Option<String>,
    /// Opening hours text.
    pub working_hours: Option<String>,
    /// Payout details text.
    pub bank_details: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a retailer.
#[derive(Debug, Clone)]
pub struct CreateRetailer {
    pub business_name: String,
    pub owner_name: String,
    pub email: String,
    pub password_hash: String,
    pub contact_number: String,
    pub address: String,
    pub gst_number: Option<String>,
    pub pan_number: Option<String>,
}

/// Partial profile update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRetailer {
    pub business_name: Option<String>,
    pub owner_name: Option<String>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub gst_number: Option<String>,
    pub pan_number: Option<String>,
    pub logo_url: Option<String>,
    pub about: Option<String>,
    pub working_hours: Option<String>,
    pub bank_details: Option<String>,
}

impl UpdateRetailer {
    /// Whether the update carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.business_name.is_none()
            && self.owner_name.is_none()
            && self.email.is_none()
            && self.contact_number.is_none()
            && self.address.is_none()
            && self.gst_number.is_none()
            && self.pan_number.is_none()
            && self.logo_url.is_none()
            && self.about.is_none()
            && self.working_hours.is_none()
            && self.bank_details.is_none()
    }
}
