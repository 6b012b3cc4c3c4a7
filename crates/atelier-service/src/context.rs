//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_entity::user::{Identity, UserType};

/// Context for the current authenticated request.
///
/// Built by the API extractor from verified token claims and passed into
/// service methods so every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The caller's `(userId, userType)`.
    pub identity: Identity,
    /// Email from the token claims.
    pub email: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(identity: Identity, email: impl Into<String>) -> Self {
        Self {
            identity,
            email: email.into(),
            request_time: Utc::now(),
        }
    }

    /// The caller's account id.
    pub fn user_id(&self) -> Uuid {
        self.identity.user_id
    }

    /// The caller's account kind.
    pub fn user_type(&self) -> UserType {
        self.identity.user_type
    }

    /// Whether the caller is the given customer.
    pub fn is_customer(&self, customer_id: Uuid) -> bool {
        self.identity == Identity::customer(customer_id)
    }

    /// Whether the caller is the given retailer.
    pub fn is_retailer(&self, retailer_id: Uuid) -> bool {
        self.identity == Identity::retailer(retailer_id)
    }

    /// The caller's id if they are a customer.
    pub fn require_customer(&self) -> Result<Uuid, AppError> {
        match self.identity.user_type {
            UserType::Customer => Ok(self.identity.user_id),
            UserType::Retailer => Err(AppError::authorization("Customer account required")),
        }
    }

    /// The caller's id if they are a retailer.
    pub fn require_retailer(&self) -> Result<Uuid, AppError> {
        match self.identity.user_type {
            UserType::Retailer => Ok(self.identity.user_id),
            UserType::Customer => Err(AppError::authorization("Retailer account required")),
        }
    }

    /// Fail unless the caller is exactly `identity`.
    pub fn ensure_is(&self, identity: Identity) -> Result<(), AppError> {
        if self.identity == identity {
            Ok(())
        } else {
            Err(AppError::authorization("Not allowed to act for this user"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_checks() {
        let id = Uuid::new_v4();
        let ctx = RequestContext::new(Identity::customer(id), "c@example.com");
        assert!(ctx.is_customer(id));
        assert!(!ctx.is_retailer(id));
        assert_eq!(ctx.require_customer().unwrap(), id);
        assert!(ctx.require_retailer().is_err());
        assert!(ctx.ensure_is(Identity::retailer(id)).is_err());
    }
}
