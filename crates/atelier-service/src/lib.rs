//! # atelier-service
//!
//! Business logic for the Atelier marketplace. Each service checks the
//! caller's [`RequestContext`] against the resource, talks to the stores
//! and hands notifications to the realtime dispatcher.
//!
//! Services take their collaborators at construction time as `Arc` trait
//! objects, so the same code runs over PostgreSQL and the in-memory store.

pub mod account;
pub mod analytics;
pub mod auction;
pub mod cart;
pub mod catalog;
pub mod context;
pub mod negotiation;
pub mod notification;
pub mod order;
pub mod room_design;

#[cfg(test)]
mod testing;

pub use account::{AccountService, AuthUser, NewCustomer, NewRetailer, Session};
pub use analytics::{AnalyticsService, RetailerAnalytics};
pub use auction::{AuctionQuery, AuctionService, NewAuction};
pub use cart::CartService;
pub use catalog::{
    CampaignQuery, CampaignService, NewCampaign, NewProduct, ProductService, ReviewQuery,
    ReviewService,
};
pub use context::RequestContext;
pub use negotiation::{NegotiationQuery, NegotiationService};
pub use notification::NotificationService;
pub use order::{OrderLine, OrderQuery, OrderService, PlaceOrder};
pub use room_design::{
    DesignBrief, ImageGenerator, ImageRequest, OpenAiImageGenerator, RoomDesignService,
};
