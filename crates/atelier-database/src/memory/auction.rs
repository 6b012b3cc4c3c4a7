use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_core::result::AppResult;
use atelier_entity::auction::{Auction, AuctionStatus, Bid, CreateAuction, CreateBid};
use atelier_entity::order::PaymentStatus;

use super::{MemoryStore, newest_first};
use crate::store::AuctionStore;

#[async_trait]
impl AuctionStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Auction>> {
        let tables = self.tables.read().await;
        Ok(tables.auctions.iter().find(|a| a.id == id).cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<Auction>> {
        let tables = self.tables.read().await;
        Ok(newest_first(tables.auctions.iter().cloned(), |a| a.created_at))
    }

    async fn list_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<Auction>> {
        let tables = self.tables.read().await;
        let rows = tables
            .auctions
            .iter()
            .filter(|a| a.customer_id == customer_id)
            .cloned();
        Ok(newest_first(rows, |a| a.created_at))
    }

    async fn list_by_retailer(&self, retailer_id: Uuid) -> AppResult<Vec<Auction>> {
        let tables = self.tables.read().await;
        let rows = tables
            .auctions
            .iter()
            .filter(|a| {
                a.retailer_id == retailer_id
                    || tables
                        .bids
                        .iter()
                        .any(|b| b.auction_id == a.id && b.bidder_id == retailer_id)
            })
            .cloned();
        Ok(newest_first(rows, |a| a.created_at))
    }

    async fn list_active(&self, now: DateTime<Utc>) -> AppResult<Vec<Auction>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Auction> = tables
            .auctions
            .iter()
            .filter(|a| a.is_running_at(now))
            .cloned()
            .collect();
        rows.sort_by_key(|a| a.end_date);
        Ok(rows)
    }

    async fn create(&self, data: CreateAuction) -> AppResult<Auction> {
        let auction = Auction {
            id: Uuid::new_v4(),
            product_id: data.product_id,
            retailer_id: data.retailer_id,
            customer_id: data.customer_id,
            start_price: data.start_price,
            current_highest_bid: None,
            current_bidder_id: None,
            start_date: data.start_date,
            end_date: data.end_date,
            number_of_bidders: 0,
            status: AuctionStatus::Active,
            winner_id: None,
            payment_status: PaymentStatus::Pending,
            created_at: Utc::now(),
        };
        self.tables.write().await.auctions.push(auction.clone());
        Ok(auction)
    }

    async fn bids_for_auction(&self, auction_id: Uuid) -> AppResult<Vec<Bid>> {
        let tables = self.tables.read().await;
        let mut bids: Vec<Bid> = tables
            .bids
            .iter()
            .filter(|b| b.auction_id == auction_id)
            .cloned()
            .collect();
        bids.sort_by(|a, b| b.bid_amount.cmp(&a.bid_amount));
        Ok(bids)
    }

    async fn place_bid(&self, data: CreateBid) -> AppResult<(Auction, Bid)> {
        let mut tables = self.tables.write().await;

        let index = tables
            .auctions
            .iter()
            .position(|a| a.id == data.auction_id)
            .ok_or_else(|| AppError::not_found("Auction not found"))?;
        if !tables.auctions[index].is_open() {
            return Err(AppError::validation("Auction is not active"));
        }

        let bid = Bid {
            id: Uuid::new_v4(),
            auction_id: data.auction_id,
            bidder_id: data.bidder_id,
            bid_amount: data.bid_amount,
            bid_date: Utc::now(),
        };
        tables.bids.push(bid.clone());

        let bidders: HashSet<Uuid> = tables
            .bids
            .iter()
            .filter(|b| b.auction_id == data.auction_id)
            .map(|b| b.bidder_id)
            .collect();

        let auction = &mut tables.auctions[index];
        if auction
            .current_highest_bid
            .is_none_or(|highest| bid.bid_amount > highest)
        {
            auction.current_highest_bid = Some(bid.bid_amount);
            auction.current_bidder_id = Some(bid.bidder_id);
        }
        auction.number_of_bidders = bidders.len() as i32;

        Ok((auction.clone(), bid))
    }

    async fn close(&self, id: Uuid, winner_id: Uuid) -> AppResult<Option<Auction>> {
        let mut tables = self.tables.write().await;
        Ok(tables.auctions.iter_mut().find(|a| a.id == id).map(|a| {
            a.status = AuctionStatus::Ended;
            a.winner_id = Some(winner_id);
            a.clone()
        }))
    }
}
