//! Auction entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::bid::Bid;
use crate::order::PaymentStatus;

/// Lifecycle of an auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "auction_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AuctionStatus {
    /// Accepting bids.
    #[default]
    Active,
    /// Closed with or without a winner.
    Ended,
    /// Withdrawn by the customer.
    Cancelled,
}

text_enum!(AuctionStatus, "auction status" {
    Active => "active",
    Ended => "ended",
    Cancelled => "cancelled",
});

/// A reverse auction: a customer asks for a product and retailers bid.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Auction {
    /// Unique auction identifier.
    pub id: Uuid,
    /// Product being auctioned.
    pub product_id: Uuid,
    /// Retailer that listed the product.
    pub retailer_id: Uuid,
    /// Customer that opened the auction.
    pub customer_id: Uuid,
    /// Opening price.
    pub start_price: Decimal,
    /// Highest accepted bid so far.
    pub current_highest_bid: Option<Decimal>,
    /// Bidder holding the highest bid.
    pub current_bidder_id: Option<Uuid>,
    /// Opening time.
    pub start_date: DateTime<Utc>,
    /// Closing time.
    pub end_date: DateTime<Utc>,
    /// Distinct bidders so far.
    pub number_of_bidders: i32,
    /// Lifecycle state.
    pub status: AuctionStatus,
    /// Winning retailer, once closed.
    pub winner_id: Option<Uuid>,
    /// Payment state of the winning bid.
    pub payment_status: PaymentStatus,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
}

impl Auction {
    /// Whether bids are accepted.
    pub fn is_open(&self) -> bool {
        self.status == AuctionStatus::Active
    }

    /// Active and not past its end date.
    pub fn is_running_at(&self, now: DateTime<Utc>) -> bool {
        self.is_open() && self.end_date > now
    }
}

/// An auction with its bids embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuctionWithBids {
    #[serde(flatten)]
    pub auction: Auction,
    pub bids: Vec<Bid>,
}

/// Data required to open an auction.
#[derive(Debug, Clone)]
pub struct CreateAuction {
    pub product_id: Uuid,
    pub retailer_id: Uuid,
    pub customer_id: Uuid,
    pub start_price: Decimal,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}
