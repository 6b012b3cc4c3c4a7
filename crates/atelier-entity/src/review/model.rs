//! Review entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Moderation state of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "review_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

text_enum!(ReviewStatus, "review status" {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
});

/// A customer's rating of a product.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub retailer_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    /// 1 to 5 stars.
    pub rating: i32,
    pub comment: Option<String>,
    /// The retailer's public reply.
    pub response: Option<String>,
    pub status: ReviewStatus,
    pub review_date: DateTime<Utc>,
}

/// Data required to post a review.
#[derive(Debug, Clone)]
pub struct CreateReview {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub retailer_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub rating: i32,
    pub comment: Option<String>,
}

/// Retailer-side changes to a review.
#[derive(Debug, Clone, Default)]
pub struct UpdateReview {
    pub response: Option<String>,
    pub status: Option<ReviewStatus>,
}
