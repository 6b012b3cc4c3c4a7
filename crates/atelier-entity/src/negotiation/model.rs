//! Negotiation thread model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::{Identity, UserType};

/// State of a negotiation thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "negotiation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NegotiationStatus {
    /// Open conversation.
    #[default]
    Active,
    /// An offer is on the table.
    Pending,
    /// Offer accepted.
    Accepted,
    /// Offer rejected.
    Rejected,
    /// Closed without agreement.
    Closed,
}

text_enum!(NegotiationStatus, "negotiation status" {
    Active => "active",
    Pending => "pending",
    Accepted => "accepted",
    Rejected => "rejected",
    Closed => "closed",
});

impl NegotiationStatus {
    /// Accepted or rejected: the outcome the customer is told about.
    pub fn is_decision(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

/// A price discussion between one customer and one retailer over one product.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Negotiation {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub retailer_id: Uuid,
    pub product_id: Uuid,
    pub status: NegotiationStatus,
    pub created_at: DateTime<Utc>,
}

impl Negotiation {
    /// Whether `who` is the customer or the retailer of this thread.
    pub fn is_participant(&self, who: &Identity) -> bool {
        match who.user_type {
            UserType::Customer => who.user_id == self.customer_id,
            UserType::Retailer => who.user_id == self.retailer_id,
        }
    }

    /// The other participant, seen from `sender`'s side.
    pub fn counterparty_of(&self, sender: UserType) -> Identity {
        match sender {
            UserType::Customer => Identity::retailer(self.retailer_id),
            UserType::Retailer => Identity::customer(self.customer_id),
        }
    }
}

/// Data required to open a negotiation.
#[derive(Debug, Clone)]
pub struct CreateNegotiation {
    pub customer_id: Uuid,
    pub retailer_id: Uuid,
    pub product_id: Uuid,
}
