//! Store traits consumed by the service layer.
//!
//! Every trait is object-safe and `Send + Sync` so services can hold
//! `Arc<dyn …Store>`. Lookups return `Ok(None)` for a missing row; mutating
//! methods that target a row by id do the same so callers can map it to
//! `404` themselves.

pub mod account;
pub mod auction;
pub mod cart;
pub mod marketing;
pub mod negotiation;
pub mod notification;
pub mod order;
pub mod product;
pub mod room_design;

use std::sync::Arc;

use sqlx::PgPool;

pub use account::{CustomerStore, RetailerStore};
pub use auction::AuctionStore;
pub use cart::CartStore;
pub use marketing::{CampaignStore, ReviewStore};
pub use negotiation::NegotiationStore;
pub use notification::NotificationStore;
pub use order::OrderStore;
pub use product::ProductStore;
pub use room_design::RoomDesignStore;

use crate::memory::MemoryStore;
use crate::repositories::{
    AuctionRepository, CampaignRepository, CartRepository, CustomerRepository,
    NegotiationRepository, NotificationRepository, OrderRepository, ProductRepository,
    RetailerRepository, ReviewRepository, RoomDesignRepository,
};

/// One handle per store, shared by every service.
#[derive(Clone)]
pub struct Stores {
    pub retailers: Arc<dyn RetailerStore>,
    pub customers: Arc<dyn CustomerStore>,
    pub products: Arc<dyn ProductStore>,
    pub orders: Arc<dyn OrderStore>,
    pub cart: Arc<dyn CartStore>,
    pub auctions: Arc<dyn AuctionStore>,
    pub reviews: Arc<dyn ReviewStore>,
    pub campaigns: Arc<dyn CampaignStore>,
    pub notifications: Arc<dyn NotificationStore>,
    pub negotiations: Arc<dyn NegotiationStore>,
    pub room_designs: Arc<dyn RoomDesignStore>,
}

impl Stores {
    /// PostgreSQL-backed stores over one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            retailers: Arc::new(RetailerRepository::new(pool.clone())),
            customers: Arc::new(CustomerRepository::new(pool.clone())),
            products: Arc::new(ProductRepository::new(pool.clone())),
            orders: Arc::new(OrderRepository::new(pool.clone())),
            cart: Arc::new(CartRepository::new(pool.clone())),
            auctions: Arc::new(AuctionRepository::new(pool.clone())),
            reviews: Arc::new(ReviewRepository::new(pool.clone())),
            campaigns: Arc::new(CampaignRepository::new(pool.clone())),
            notifications: Arc::new(NotificationRepository::new(pool.clone())),
            negotiations: Arc::new(NegotiationRepository::new(pool.clone())),
            room_designs: Arc::new(RoomDesignRepository::new(pool)),
        }
    }

    /// Every store backed by the same in-memory tables.
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            retailers: store.clone(),
            customers: store.clone(),
            products: store.clone(),
            orders: store.clone(),
            cart: store.clone(),
            auctions: store.clone(),
            reviews: store.clone(),
            campaigns: store.clone(),
            notifications: store.clone(),
            negotiations: store.clone(),
            room_designs: store,
        }
    }
}
