//! Order store.

use async_trait::async_trait;
use uuid::Uuid;

use atelier_core::result::AppResult;
use atelier_entity::order::{CreateOrder, CreateOrderItem, Order, OrderWithItems, UpdateOrder};

/// Orders and their line items. Lists are newest first.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<OrderWithItems>>;
    async fn list_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<OrderWithItems>>;
    /// Orders containing at least one item sold by `retailer_id`.
    async fn list_by_retailer(&self, retailer_id: Uuid) -> AppResult<Vec<OrderWithItems>>;

    /// Insert the order, insert every item and clear the customer's cart as
    /// one unit. Nothing is written if any step fails.
    async fn place_order(
        &self,
        order: CreateOrder,
        items: Vec<CreateOrderItem>,
    ) -> AppResult<OrderWithItems>;

    async fn update(&self, id: Uuid, data: &UpdateOrder) -> AppResult<Option<Order>>;
}
