//! Checkout and order status management.

pub mod service;

pub use service::{OrderLine, OrderQuery, OrderService, PlaceOrder};
