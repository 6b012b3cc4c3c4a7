//! Shopping cart store.

use async_trait::async_trait;
use uuid::Uuid;

use atelier_core::result::AppResult;
use atelier_entity::cart::{CartItem, CartLine, CreateCartItem};

#[async_trait]
pub trait CartStore: Send + Sync {
    /// Cart items joined with their product, oldest first.
    async fn list_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<CartLine>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CartItem>>;
    /// One line per (customer, product): adding a product already in the
    /// cart increases that line's quantity.
    async fn add(&self, data: CreateCartItem) -> AppResult<CartItem>;
    async fn update_quantity(&self, id: Uuid, quantity: i32) -> AppResult<Option<CartItem>>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
    /// Remove every item of the customer, returning how many went.
    async fn clear(&self, customer_id: Uuid) -> AppResult<u64>;
}
