//! Registration, login and profiles for retailers and customers.

pub mod service;

pub use service::{AccountService, AuthUser, NewCustomer, NewRetailer, Session};
