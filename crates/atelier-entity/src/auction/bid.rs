//! Bid entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A retailer's offer on an auction.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    /// Unique bid identifier.
    pub id: Uuid,
    /// Auction bid on.
    pub auction_id: Uuid,
    /// Bidding retailer.
    pub bidder_id: Uuid,
    /// Offered amount.
    pub bid_amount: Decimal,
    /// When the bid was placed.
    pub bid_date: DateTime<Utc>,
}

/// Data required to place a bid.
#[derive(Debug, Clone)]
pub struct CreateBid {
    pub auction_id: Uuid,
    pub bidder_id: Uuid,
    pub bid_amount: Decimal,
}
