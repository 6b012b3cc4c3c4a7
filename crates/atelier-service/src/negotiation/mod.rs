//! Price negotiation threads between a customer and a retailer.

pub mod service;

pub use service::{NegotiationQuery, NegotiationService};
