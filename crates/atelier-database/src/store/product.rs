//! Catalog store.

use async_trait::async_trait;
use uuid::Uuid;

use atelier_core::result::AppResult;
use atelier_entity::product::{CreateProduct, Product, ProductFilter, UpdateProduct};

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>>;
    /// Products among `ids`; unknown ids are skipped.
    async fn find_many(&self, ids: &[Uuid]) -> AppResult<Vec<Product>>;
    /// Newest first.
    async fn list(&self, filter: &ProductFilter) -> AppResult<Vec<Product>>;
    async fn create(&self, data: CreateProduct) -> AppResult<Product>;
    async fn update(&self, id: Uuid, data: &UpdateProduct) -> AppResult<Option<Product>>;
    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
