//! Price negotiation entities.

pub mod message;
pub mod model;

pub use message::{CreateNegotiationMessage, NegotiationMessage};
pub use model::{CreateNegotiation, Negotiation, NegotiationStatus};
