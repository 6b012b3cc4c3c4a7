//! # atelier-database
//!
//! Persistence for the Atelier marketplace.
//!
//! Services only see the traits in [`store`]. Two implementations exist:
//! the PostgreSQL repositories in [`repositories`] used by the server, and
//! [`memory::MemoryStore`] used by tests. Both honor the same transactional
//! rules for order placement and bid acceptance.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::Stores;
