//! User type and identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The two tenant kinds of the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// A seller.
    Retailer,
    /// A buyer.
    Customer,
}

text_enum!(UserType, "user type" {
    Retailer => "retailer",
    Customer => "customer",
});

impl UserType {
    /// The other side of a customer/retailer conversation.
    pub fn counterpart(&self) -> Self {
        match self {
            Self::Retailer => Self::Customer,
            Self::Customer => Self::Retailer,
        }
    }
}

/// A `(userId, userType)` pair.
///
/// Retailer and customer ids live in separate tables, so the type is part
/// of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Account id.
    pub user_id: Uuid,
    /// Account kind.
    pub user_type: UserType,
}

impl Identity {
    /// Build an identity.
    pub fn new(user_id: Uuid, user_type: UserType) -> Self {
        Self { user_id, user_type }
    }

    /// A retailer identity.
    pub fn retailer(user_id: Uuid) -> Self {
        Self::new(user_id, UserType::Retailer)
    }

    /// A customer identity.
    pub fn customer(user_id: Uuid) -> Self {
        Self::new(user_id, UserType::Customer)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.user_type, self.user_id)
    }
}
