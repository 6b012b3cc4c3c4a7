//! PostgreSQL repository implementations of the store traits.

pub mod account;
pub mod auction;
pub mod cart;
pub mod marketing;
pub mod negotiation;
pub mod notification;
pub mod order;
pub mod product;
pub mod room_design;

pub use account::{CustomerRepository, RetailerRepository};
pub use auction::AuctionRepository;
pub use cart::CartRepository;
pub use marketing::{CampaignRepository, ReviewRepository};
pub use negotiation::NegotiationRepository;
pub use notification::NotificationRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use room_design::RoomDesignRepository;

use atelier_core::error::{AppError, ErrorKind};

/// Map a write failure, turning unique violations into `Conflict`.
pub(crate) fn write_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        let unique = e
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation());
        if unique {
            AppError::with_source(ErrorKind::Conflict, "Email already registered", e)
        } else {
            AppError::with_source(ErrorKind::Database, context, e)
        }
    }
}
