//! Customer-initiated auctions and retailer bids.

pub mod service;

pub use service::{AuctionQuery, AuctionService, NewAuction};
