//! Auction and bid repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use atelier_core::error::{AppError, ErrorKind};
use atelier_core::result::AppResult;
use atelier_entity::auction::{Auction, AuctionStatus, Bid, CreateAuction, CreateBid};

use crate::store::AuctionStore;

/// Repository for auctions and their bids.
#[derive(Debug, Clone)]
pub struct AuctionRepository {
    pool: PgPool,
}

impl AuctionRepository {
    /// Create a new auction repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuctionStore for AuctionRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Auction>> {
        sqlx::query_as::<_, Auction>("SELECT * FROM auctions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find auction", e))
    }

    async fn list_all(&self) -> AppResult<Vec<Auction>> {
        sqlx::query_as::<_, Auction>("SELECT * FROM auctions ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list auctions", e))
    }

    async fn list_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<Auction>> {
        sqlx::query_as::<_, Auction>(
            "SELECT * FROM auctions WHERE customer_id = $1 ORDER BY created_at DESC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list customer auctions", e)
        })
    }

    async fn list_by_retailer(&self, retailer_id: Uuid) -> AppResult<Vec<Auction>> {
        sqlx::query_as::<_, Auction>(
            "SELECT * FROM auctions a \
             WHERE a.retailer_id = $1 \
                OR EXISTS (SELECT 1 FROM bids b WHERE b.auction_id = a.id AND b.bidder_id = $1) \
             ORDER BY a.created_at DESC",
        )
        .bind(retailer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list retailer auctions", e)
        })
    }

    async fn list_active(&self, now: DateTime<Utc>) -> AppResult<Vec<Auction>> {
        sqlx::query_as::<_, Auction>(
            "SELECT * FROM auctions WHERE status = $1 AND end_date > $2 ORDER BY end_date",
        )
        .bind(AuctionStatus::Active)
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list active auctions", e)
        })
    }

    async fn create(&self, data: CreateAuction) -> AppResult<Auction> {
        sqlx::query_as::<_, Auction>(
            "INSERT INTO auctions (product_id, retailer_id, customer_id, start_price, start_date, end_date) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.product_id)
        .bind(data.retailer_id)
        .bind(data.customer_id)
        .bind(data.start_price)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create auction", e))
    }

    async fn bids_for_auction(&self, auction_id: Uuid) -> AppResult<Vec<Bid>> {
        sqlx::query_as::<_, Bid>(
            "SELECT * FROM bids WHERE auction_id = $1 ORDER BY bid_amount DESC, bid_date",
        )
        .bind(auction_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bids", e))
    }

    async fn place_bid(&self, data: CreateBid) -> AppResult<(Auction, Bid)> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        // Row lock: concurrent bids on one auction queue here.
        let auction =
            sqlx::query_as::<_, Auction>("SELECT * FROM auctions WHERE id = $1 FOR UPDATE")
                .bind(data.auction_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to lock auction", e)
                })?
                .ok_or_else(|| AppError::not_found("Auction not found"))?;

        if !auction.is_open() {
            return Err(AppError::validation("Auction is not active"));
        }

        let bid = sqlx::query_as::<_, Bid>(
            "INSERT INTO bids (auction_id, bidder_id, bid_amount) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.auction_id)
        .bind(data.bidder_id)
        .bind(data.bid_amount)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create bid", e))?;

        let bidders: i64 =
            sqlx::query_scalar("SELECT COUNT(DISTINCT bidder_id) FROM bids WHERE auction_id = $1")
                .bind(data.auction_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count bidders", e)
                })?;

        let outbid = auction
            .current_highest_bid
            .is_none_or(|highest| bid.bid_amount > highest);
        let (highest, leader) = if outbid {
            (Some(bid.bid_amount), Some(bid.bidder_id))
        } else {
            (auction.current_highest_bid, auction.current_bidder_id)
        };

        let updated = sqlx::query_as::<_, Auction>(
            "UPDATE auctions SET current_highest_bid = $2, current_bidder_id = $3, number_of_bidders = $4 \
             WHERE id = $1 RETURNING *",
        )
        .bind(auction.id)
        .bind(highest)
        .bind(leader)
        .bind(bidders as i32)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update auction", e))?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit bid", e))?;

        Ok((updated, bid))
    }

    async fn close(&self, id: Uuid, winner_id: Uuid) -> AppResult<Option<Auction>> {
        sqlx::query_as::<_, Auction>(
            "UPDATE auctions SET status = $2, winner_id = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(AuctionStatus::Ended)
        .bind(winner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to close auction", e))
    }
}
