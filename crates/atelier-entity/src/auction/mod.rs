//! Auction and bid entities.

pub mod bid;
pub mod model;

pub use bid::{Bid, CreateBid};
pub use model::{Auction, AuctionStatus, AuctionWithBids, CreateAuction};
