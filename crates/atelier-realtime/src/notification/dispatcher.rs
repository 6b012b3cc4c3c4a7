//! Notification dispatcher: persists the row, then pushes over WebSocket.

use std::sync::Arc;

use tracing::{debug, warn};

use atelier_database::store::NotificationStore;
use atelier_entity::notification::{CreateNotification, Notification};
use atelier_entity::user::Identity;

use crate::connection::registry::ConnectionRegistry;
use crate::message::types::OutboundMessage;

/// Routes marketplace events to the notification table and to live sockets.
///
/// Both halves are best effort. A failed write or an offline recipient is
/// logged and never fails the business operation that raised the event.
#[derive(Clone)]
pub struct NotificationDispatcher {
    store: Arc<dyn NotificationStore>,
    registry: Arc<ConnectionRegistry>,
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl NotificationDispatcher {
    /// Create a new dispatcher.
    pub fn new(store: Arc<dyn NotificationStore>, registry: Arc<ConnectionRegistry>) -> Self {
        Self { store, registry }
    }

    /// Write a notification row. Returns `None` when the write failed.
    pub async fn notify(&self, data: CreateNotification) -> Option<Notification> {
        let recipient = data.recipient;
        let kind = data.kind;
        match self.store.create(data).await {
            Ok(notification) => {
                debug!(
                    notification_id = %notification.id,
                    recipient = %recipient,
                    kind = %kind,
                    "Notification stored"
                );
                Some(notification)
            }
            Err(e) => {
                warn!(recipient = %recipient, kind = %kind, error = %e, "Failed to store notification");
                None
            }
        }
    }

    /// Push a live message. Returns how many sockets received it.
    pub fn push(&self, recipient: Identity, message: &OutboundMessage) -> usize {
        if !self.registry.is_online(recipient) {
            debug!(recipient = %recipient, kind = message.kind(), "Recipient offline, push skipped");
            return 0;
        }
        self.registry.send_to(recipient, message)
    }

    /// Persist first, then push.
    pub async fn notify_and_push(
        &self,
        data: CreateNotification,
        message: &OutboundMessage,
    ) -> Option<Notification> {
        let recipient = data.recipient;
        let stored = self.notify(data).await;
        self.push(recipient, message);
        stored
    }
}
