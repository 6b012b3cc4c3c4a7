//! Room design store.

use async_trait::async_trait;
use uuid::Uuid;

use atelier_core::result::AppResult;
use atelier_entity::room_design::{CreateRoomDesign, RoomDesign};

#[async_trait]
pub trait RoomDesignStore: Send + Sync {
    /// Newest first.
    async fn list_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<RoomDesign>>;
    /// Insert every design, preserving input order in the result.
    async fn create_many(&self, designs: Vec<CreateRoomDesign>) -> AppResult<Vec<RoomDesign>>;
}
