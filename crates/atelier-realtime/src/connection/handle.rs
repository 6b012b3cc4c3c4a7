//! Individual WebSocket connection handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::{Notify, mpsc};
use uuid::Uuid;

/// Unique connection identifier.
pub type ConnectionId = Uuid;

/// Write side of one socket.
///
/// The socket task owns the receiving end of `sender` and forwards frames
/// in order, so everything sent through one handle arrives in send order.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID.
    pub id: ConnectionId,
    /// Serialized outbound frames.
    sender: mpsc::Sender<String>,
    /// When the socket was accepted.
    pub connected_at: DateTime<Utc>,
    alive: AtomicBool,
    closed: Notify,
}

impl ConnectionHandle {
    /// Create a handle and the receiver the socket task drains.
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<String>) {
        let (sender, rx) = mpsc::channel(buffer.max(1));
        let handle = Self {
            id: Uuid::new_v4(),
            sender,
            connected_at: Utc::now(),
            alive: AtomicBool::new(true),
            closed: Notify::new(),
        };
        (handle, rx)
    }

    /// Queue a frame without waiting. Returns `false` if it was dropped.
    pub fn send(&self, payload: String) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(payload) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(conn_id = %self.id, "Send buffer full, dropping message");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_dead();
                false
            }
        }
    }

    /// Whether frames are still accepted.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Stop accepting frames.
    pub fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    /// Stop accepting frames and wake the socket task so it hangs up.
    pub fn close(&self) {
        self.mark_dead();
        self.closed.notify_one();
    }

    /// Resolves once [`close`](Self::close) has been called.
    pub async fn closed(&self) {
        if !self.is_alive() {
            return;
        }
        self.closed.notified().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_delivers_in_order() {
        let (handle, mut rx) = ConnectionHandle::new(4);
        assert!(handle.send("a".to_string()));
        assert!(handle.send("b".to_string()));
        assert_eq!(rx.recv().await.as_deref(), Some("a"));
        assert_eq!(rx.recv().await.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn test_full_buffer_drops() {
        let (handle, _rx) = ConnectionHandle::new(1);
        assert!(handle.send("first".to_string()));
        assert!(!handle.send("second".to_string()));
        assert!(handle.is_alive());
    }

    #[tokio::test]
    async fn test_closed_receiver_marks_dead() {
        let (handle, rx) = ConnectionHandle::new(1);
        drop(rx);
        assert!(!handle.send("x".to_string()));
        assert!(!handle.is_alive());
    }

    #[tokio::test]
    async fn test_close_wakes_waiter() {
        let (handle, _rx) = ConnectionHandle::new(1);
        handle.close();
        // permit stored by notify_one, so this returns immediately
        handle.closed().await;
        assert!(!handle.is_alive());
    }
}
