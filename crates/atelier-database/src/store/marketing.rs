//! Review and campaign stores.

use async_trait::async_trait;
use uuid::Uuid;

use atelier_core::result::AppResult;
use atelier_entity::campaign::{Campaign, CreateCampaign, UpdateCampaign};
use atelier_entity::review::{CreateReview, Review, UpdateReview};

/// Product reviews, newest first.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>>;
    async fn list_by_product(&self, product_id: Uuid) -> AppResult<Vec<Review>>;
    async fn list_by_retailer(&self, retailer_id: Uuid) -> AppResult<Vec<Review>>;
    async fn create(&self, data: CreateReview) -> AppResult<Review>;
    async fn update(&self, id: Uuid, data: &UpdateReview) -> AppResult<Option<Review>>;
}

/// Marketing campaigns, newest first.
#[async_trait]
pub trait CampaignStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Campaign>>;
    async fn list_by_retailer(&self, retailer_id: Uuid) -> AppResult<Vec<Campaign>>;
    /// Campaigns with status `active`.
    async fn list_active(&self) -> AppResult<Vec<Campaign>>;
    async fn create(&self, data: CreateCampaign) -> AppResult<Campaign>;
    async fn update(&self, id: Uuid, data: &UpdateCampaign) -> AppResult<Option<Campaign>>;
}
