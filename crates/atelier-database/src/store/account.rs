//! Retailer and customer account stores.

use async_trait::async_trait;
use uuid::Uuid;

use atelier_core::result::AppResult;
use atelier_entity::user::{
    CreateCustomer, CreateRetailer, Customer, Retailer, UpdateCustomer, UpdateRetailer,
};

/// Retailer accounts. Emails are unique; a duplicate is a `Conflict`.
#[async_trait]
pub trait RetailerStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Retailer>>;
    /// Case-insensitive lookup.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Retailer>>;
    async fn create(&self, data: CreateRetailer) -> AppResult<Retailer>;
    async fn update(&self, id: Uuid, data: &UpdateRetailer) -> AppResult<Option<Retailer>>;
}

/// Customer accounts. Emails are unique; a duplicate is a `Conflict`.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Customer>>;
    /// Case-insensitive lookup.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Customer>>;
    async fn create(&self, data: CreateCustomer) -> AppResult<Customer>;
    async fn update(&self, id: Uuid, data: &UpdateCustomer) -> AppResult<Option<Customer>>;
}
