//! Customer shopping carts.

pub mod service;

pub use service::CartService;
