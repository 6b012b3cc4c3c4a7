//! Account entities: retailers, customers and the identity pair that keys
//! notifications and live pushes.

pub mod customer;
pub mod identity;
pub mod retailer;

pub use customer::{CreateCustomer, Customer, UpdateCustomer};
pub use identity::{Identity, UserType};
pub use retailer::{CreateRetailer, Retailer, UpdateRetailer};
