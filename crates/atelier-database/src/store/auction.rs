//! Auction and bid store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use atelier_core::result::AppResult;
use atelier_entity::auction::{Auction, Bid, CreateAuction, CreateBid};

#[async_trait]
pub trait AuctionStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Auction>>;
    async fn list_all(&self) -> AppResult<Vec<Auction>>;
    async fn list_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<Auction>>;
    /// Auctions assigned to the retailer or carrying one of its bids.
    async fn list_by_retailer(&self, retailer_id: Uuid) -> AppResult<Vec<Auction>>;
    /// Status `active` with an end date after `now`.
    async fn list_active(&self, now: DateTime<Utc>) -> AppResult<Vec<Auction>>;
    async fn create(&self, data: CreateAuction) -> AppResult<Auction>;
    /// Highest amount first.
    async fn bids_for_auction(&self, auction_id: Uuid) -> AppResult<Vec<Bid>>;

    /// Accept a bid while holding the auction exclusively.
    ///
    /// Fails with `NotFound` for an unknown auction and `Validation` when
    /// it is not active; neither writes a bid. On success the cached
    /// highest bid, highest bidder and distinct bidder count are refreshed
    /// in the same unit of work.
    async fn place_bid(&self, data: CreateBid) -> AppResult<(Auction, Bid)>;

    /// Mark the auction ended with a winner.
    async fn close(&self, id: Uuid, winner_id: Uuid) -> AppResult<Option<Auction>>;
}
