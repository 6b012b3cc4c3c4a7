//! Notification reads for the addressed user.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_database::store::NotificationStore;
use atelier_entity::notification::Notification;
use atelier_entity::user::Identity;

use crate::context::RequestContext;

/// Lists and marks notifications. Writing them is the dispatcher's job.
#[derive(Clone)]
pub struct NotificationService {
    notifications: Arc<dyn NotificationStore>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notifications: Arc<dyn NotificationStore>) -> Self {
        Self { notifications }
    }

    /// Lists notifications for `recipient`, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        recipient: Identity,
    ) -> Result<Vec<Notification>, AppError> {
        ctx.ensure_is(recipient)?;
        self.notifications.list_for(recipient).await
    }

    /// Marks a notification as read. Reading it again changes nothing.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Notification, AppError> {
        let notification = self
            .notifications
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))?;
        if notification.recipient() != ctx.identity {
            return Err(AppError::authorization("Not your notification"));
        }

        let read = self
            .notifications
            .mark_read(id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))?;
        debug!(notification_id = %id, "Notification marked read");
        Ok(read)
    }
}
