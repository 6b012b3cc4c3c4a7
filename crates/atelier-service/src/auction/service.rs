//! Auction creation, bidding and closing.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_database::store::{AuctionStore, ProductStore};
use atelier_entity::auction::{Auction, AuctionWithBids, Bid, CreateAuction, CreateBid};
use atelier_entity::money;
use atelier_entity::notification::{CreateNotification, NotificationKind};
use atelier_entity::user::Identity;
use atelier_realtime::{NotificationDispatcher, OutboundMessage};

use crate::context::RequestContext;

/// Data for opening an auction.
#[derive(Debug, Clone)]
pub struct NewAuction {
    pub product_id: Uuid,
    /// Defaults to the product's retailer.
    pub retailer_id: Option<Uuid>,
    pub start_price: Decimal,
    /// Defaults to now.
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: DateTime<Utc>,
}

/// Listing filter for `GET /api/auctions`.
#[derive(Debug, Clone, Default)]
pub struct AuctionQuery {
    pub customer_id: Option<Uuid>,
    pub retailer_id: Option<Uuid>,
    /// Only running auctions.
    pub active: bool,
}

/// Auction lifecycle. Bid acceptance is serialized per auction by the
/// store; this service adds validation and the owner notifications.
#[derive(Clone)]
pub struct AuctionService {
    auctions: Arc<dyn AuctionStore>,
    products: Arc<dyn ProductStore>,
    dispatcher: NotificationDispatcher,
}

impl AuctionService {
    /// Creates a new auction service.
    pub fn new(
        auctions: Arc<dyn AuctionStore>,
        products: Arc<dyn ProductStore>,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            auctions,
            products,
            dispatcher,
        }
    }

    /// Opens an auction owned by the calling customer.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: NewAuction,
    ) -> Result<Auction, AppError> {
        let customer_id = ctx.require_customer()?;
        if data.start_price.is_sign_negative() {
            return Err(AppError::validation("Start price cannot be negative"));
        }
        let start_date = data.start_date.unwrap_or(ctx.request_time);
        if data.end_date <= start_date {
            return Err(AppError::validation("End date must be after the start date"));
        }

        let product = self
            .products
            .find_by_id(data.product_id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))?;

        let auction = self
            .auctions
            .create(CreateAuction {
                product_id: product.id,
                retailer_id: data.retailer_id.unwrap_or(product.retailer_id),
                customer_id,
                start_price: money::normalize(data.start_price),
                start_date,
                end_date: data.end_date,
            })
            .await?;

        info!(auction_id = %auction.id, customer_id = %customer_id, "Auction created");
        Ok(auction)
    }

    /// Lists auctions with their bids embedded.
    pub async fn list(&self, query: AuctionQuery) -> Result<Vec<AuctionWithBids>, AppError> {
        let mut auctions = match (query.customer_id, query.retailer_id) {
            (Some(customer_id), _) => self.auctions.list_by_customer(customer_id).await?,
            (None, Some(retailer_id)) => self.auctions.list_by_retailer(retailer_id).await?,
            (None, None) if query.active => self.auctions.list_active(Utc::now()).await?,
            (None, None) => self.auctions.list_all().await?,
        };
        if query.active {
            let now = Utc::now();
            auctions.retain(|a| a.is_running_at(now));
        }

        let mut out = Vec::with_capacity(auctions.len());
        for auction in auctions {
            let bids = self.auctions.bids_for_auction(auction.id).await?;
            out.push(AuctionWithBids { auction, bids });
        }
        Ok(out)
    }

    /// Fetches one auction with its bids, highest first.
    pub async fn get(&self, id: Uuid) -> Result<AuctionWithBids, AppError> {
        let auction = self.find(id).await?;
        let bids = self.auctions.bids_for_auction(id).await?;
        Ok(AuctionWithBids { auction, bids })
    }

    /// Places a bid as the calling retailer.
    ///
    /// Lower bids are accepted and stored; only the cached highest bid
    /// ignores them. The auction's customer is notified of every bid.
    pub async fn place_bid(
        &self,
        ctx: &RequestContext,
        auction_id: Uuid,
        amount: Decimal,
    ) -> Result<Bid, AppError> {
        let bidder_id = ctx.require_retailer()?;
        if amount <= Decimal::ZERO {
            return Err(AppError::validation("Bid amount must be positive"));
        }

        let (auction, bid) = self
            .auctions
            .place_bid(CreateBid {
                auction_id,
                bidder_id,
                bid_amount: money::normalize(amount),
            })
            .await?;

        info!(
            auction_id = %auction_id,
            bidder_id = %bidder_id,
            amount = %bid.bid_amount,
            bidders = auction.number_of_bidders,
            "Bid placed"
        );

        let notification = CreateNotification::new(
            Identity::customer(auction.customer_id),
            NotificationKind::Auction,
            "New Bid on Your Auction",
            format!("A retailer has placed a bid of ₹{}", bid.bid_amount),
        )
        .related_to(auction.id);

        self.dispatcher
            .notify_and_push(
                notification,
                &OutboundMessage::NewBid {
                    auction_id,
                    bid: bid.clone(),
                },
            )
            .await;

        Ok(bid)
    }

    /// Ends an auction with `winner_id` as the winning retailer.
    pub async fn close(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        winner_id: Uuid,
    ) -> Result<Auction, AppError> {
        let auction = self.find(id).await?;
        if !ctx.is_customer(auction.customer_id) {
            return Err(AppError::authorization("Only the auction owner can close it"));
        }
        if !auction.is_open() {
            return Err(AppError::validation("Auction is not active"));
        }
        let bids = self.auctions.bids_for_auction(id).await?;
        if !bids.iter().any(|b| b.bidder_id == winner_id) {
            return Err(AppError::validation("Winner must have bid on this auction"));
        }

        let closed = self
            .auctions
            .close(id, winner_id)
            .await?
            .ok_or_else(|| AppError::not_found("Auction not found"))?;

        info!(auction_id = %id, winner_id = %winner_id, "Auction closed");

        let notification = CreateNotification::new(
            Identity::retailer(winner_id),
            NotificationKind::Auction,
            "You Won an Auction!",
            "Congratulations! You won the auction",
        )
        .related_to(id);

        self.dispatcher
            .notify_and_push(
                notification,
                &OutboundMessage::AuctionWon {
                    auction: closed.clone(),
                },
            )
            .await;

        Ok(closed)
    }

    async fn find(&self, id: Uuid) -> Result<Auction, AppError> {
        self.auctions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Auction not found"))
    }
}
