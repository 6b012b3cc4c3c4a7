//! Negotiation message model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::UserType;

/// One message in a negotiation thread.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct NegotiationMessage {
    pub id: Uuid,
    pub negotiation_id: Uuid,
    /// Authenticated sender id.
    pub sender_id: Uuid,
    /// Authenticated sender kind.
    pub sender_type: UserType,
    pub message: String,
    /// Price offered with this message, if any.
    pub offer_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// Data required to append a message. The sender always comes from the
/// authenticated caller.
#[derive(Debug, Clone)]
pub struct CreateNegotiationMessage {
    pub negotiation_id: Uuid,
    pub sender_id: Uuid,
    pub sender_type: UserType,
    pub message: String,
    pub offer_price: Option<Decimal>,
}
