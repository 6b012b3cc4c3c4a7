//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::{Identity, UserType};

/// Event family that produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Order,
    Auction,
    Review,
    Negotiation,
}

text_enum!(NotificationKind, "notification type" {
    Order => "order",
    Auction => "auction",
    Review => "review",
    Negotiation => "negotiation",
});

/// A durable record of an event that needs a user's attention.
///
/// Only `is_read` ever changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// Recipient id.
    pub user_id: Uuid,
    /// Recipient kind.
    pub user_type: UserType,
    /// Event family.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Whether the recipient has read it.
    pub is_read: bool,
    /// Id of the order, auction, etc. that triggered it.
    pub related_id: Option<Uuid>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// The recipient identity.
    pub fn recipient(&self) -> Identity {
        Identity::new(self.user_id, self.user_type)
    }
}

/// Data required to write a notification.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub recipient: Identity,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub related_id: Option<Uuid>,
}

impl CreateNotification {
    /// Build a notification for `recipient`.
    pub fn new(
        recipient: Identity,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            recipient,
            kind,
            title: title.into(),
            message: message.into(),
            related_id: None,
        }
    }

    /// Attach the id of the entity that triggered the notification.
    pub fn related_to(mut self, id: Uuid) -> Self {
        self.related_id = Some(id);
        self
    }
}
