//! JWT claims carried by every bearer token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use atelier_entity::user::{Identity, UserType};

/// Claims payload of an Atelier bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Subject: the retailer or customer id.
    pub sub: Uuid,
    /// Account email at issuance.
    pub email: String,
    /// Which table `sub` belongs to.
    pub user_type: UserType,
    /// Issued-at (seconds since epoch).
    pub iat: i64,
    /// Expiration (seconds since epoch).
    pub exp: i64,
    /// Token id.
    pub jti: Uuid,
    /// Issuer.
    pub iss: String,
}

impl Claims {
    /// The `(userId, userType)` pair the token speaks for.
    pub fn identity(&self) -> Identity {
        Identity::new(self.sub, self.user_type)
    }

    /// Expiration as a timestamp.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}
