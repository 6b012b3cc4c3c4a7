//! Notification store.

use async_trait::async_trait;
use uuid::Uuid;

use atelier_core::result::AppResult;
use atelier_entity::notification::{CreateNotification, Notification};
use atelier_entity::user::Identity;

#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>>;
    /// Notifications addressed to `recipient`, newest first.
    async fn list_for(&self, recipient: Identity) -> AppResult<Vec<Notification>>;
    async fn create(&self, data: CreateNotification) -> AppResult<Notification>;
    /// Set `is_read`. Reading an already-read row is a no-op.
    async fn mark_read(&self, id: Uuid) -> AppResult<Option<Notification>>;
}
