//! Identity-keyed connection registry.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use tracing::{debug, info, warn};

use atelier_auth::JwtDecoder;
use atelier_core::config::RealtimeConfig;
use atelier_entity::user::Identity;

use super::handle::{ConnectionHandle, ConnectionId};
use crate::message::types::{InboundMessage, OutboundMessage};

/// Maps `(userId, userType)` to the sockets open for it.
///
/// Sockets start anonymous after [`connect`](Self::connect) and receive
/// pushes only once [`register`](Self::register)ed. One process owns the
/// registry; it is not persisted.
pub struct ConnectionRegistry {
    /// Identity to its handles, oldest first.
    by_identity: DashMap<Identity, Vec<Arc<ConnectionHandle>>>,
    /// Every open socket, registered or not.
    by_id: DashMap<ConnectionId, Arc<ConnectionHandle>>,
    /// Current identity of each registered socket.
    identities: DashMap<ConnectionId, Identity>,
    decoder: JwtDecoder,
    config: RealtimeConfig,
}

impl std::fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionRegistry")
            .field("connections", &self.by_id.len())
            .field("identities", &self.by_identity.len())
            .field("config", &self.config)
            .finish()
    }
}

impl ConnectionRegistry {
    /// Create an empty registry.
    pub fn new(config: RealtimeConfig, decoder: JwtDecoder) -> Self {
        Self {
            by_identity: DashMap::new(),
            by_id: DashMap::new(),
            identities: DashMap::new(),
            decoder,
            config,
        }
    }

    /// Track a new, anonymous socket.
    pub fn connect(&self) -> (Arc<ConnectionHandle>, tokio::sync::mpsc::Receiver<String>) {
        let (handle, rx) = ConnectionHandle::new(self.config.channel_buffer_size);
        let handle = Arc::new(handle);
        self.by_id.insert(handle.id, handle.clone());
        debug!(conn_id = %handle.id, "WebSocket connection opened");
        (handle, rx)
    }

    /// Attach `handle` to `identity`, moving it if it was registered
    /// elsewhere. Past `max_connections_per_identity` the oldest socket of
    /// that identity is closed.
    pub fn register(&self, handle: &Arc<ConnectionHandle>, identity: Identity) {
        self.by_id.insert(handle.id, handle.clone());

        if let Some(previous) = self.identities.insert(handle.id, identity) {
            if previous == identity {
                return;
            }
            self.detach(handle.id, previous);
        }

        let evicted = {
            let mut handles = self.by_identity.entry(identity).or_default();
            handles.push(handle.clone());
            let excess = handles
                .len()
                .saturating_sub(self.config.max_connections_per_identity.max(1));
            handles.drain(..excess).collect::<Vec<_>>()
        };

        for old in evicted {
            warn!(
                identity = %identity,
                conn_id = %old.id,
                max = self.config.max_connections_per_identity,
                "Connection limit reached, closing oldest"
            );
            self.identities.remove(&old.id);
            self.by_id.remove(&old.id);
            old.close();
        }

        info!(conn_id = %handle.id, identity = %identity, "WebSocket connection registered");
    }

    /// Forget a socket. Safe to call for unknown or already removed ids.
    pub fn unregister(&self, conn_id: ConnectionId) {
        let removed = self.by_id.remove(&conn_id);
        if let Some((_, identity)) = self.identities.remove(&conn_id) {
            self.detach(conn_id, identity);
            let connected_secs = removed
                .map(|(_, h)| (Utc::now() - h.connected_at).num_seconds())
                .unwrap_or_default();
            info!(
                conn_id = %conn_id,
                identity = %identity,
                connected_secs,
                "WebSocket connection unregistered"
            );
        }
    }

    fn detach(&self, conn_id: ConnectionId, identity: Identity) {
        if let Some(mut handles) = self.by_identity.get_mut(&identity) {
            handles.retain(|h| h.id != conn_id);
            if handles.is_empty() {
                drop(handles);
                self.by_identity.remove_if(&identity, |_, v| v.is_empty());
            }
        }
    }

    /// Push `message` to every live socket of `identity`.
    ///
    /// Serializes once. Returns how many sockets accepted the frame; zero
    /// when the identity is offline.
    pub fn send_to(&self, identity: Identity, message: &OutboundMessage) -> usize {
        let handles = match self.by_identity.get(&identity) {
            Some(entry) => entry.value().clone(),
            None => return 0,
        };

        let payload = match serde_json::to_string(message) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, kind = message.kind(), "Failed to serialize push");
                return 0;
            }
        };

        let delivered = handles
            .iter()
            .filter(|h| h.send(payload.clone()))
            .count();
        debug!(identity = %identity, kind = message.kind(), delivered, "Push sent");
        delivered
    }

    /// Reply on one socket.
    fn reply(&self, handle: &ConnectionHandle, message: &OutboundMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                handle.send(payload);
            }
            Err(e) => warn!(error = %e, "Failed to serialize reply"),
        }
    }

    /// Handle one text frame from a client.
    pub fn handle_inbound(&self, handle: &Arc<ConnectionHandle>, raw: &str) {
        let msg: InboundMessage = match serde_json::from_str(raw) {
            Ok(m) => m,
            Err(e) => {
                self.reply(
                    handle,
                    &OutboundMessage::error("INVALID_MESSAGE", format!("Failed to parse message: {e}")),
                );
                return;
            }
        };

        match msg {
            InboundMessage::Ping => self.reply(handle, &OutboundMessage::Pong),
            InboundMessage::Auth {
                user_id,
                user_type,
                token,
            } => {
                let identity = Identity::new(user_id, user_type);
                if let Err(reason) = self.check_token(identity, token.as_deref()) {
                    warn!(conn_id = %handle.id, identity = %identity, reason, "WebSocket auth rejected");
                    self.reply(handle, &OutboundMessage::error("AUTH_FAILED", reason));
                    return;
                }
                self.register(handle, identity);
                self.reply(handle, &OutboundMessage::AuthSuccess);
            }
        }
    }

    /// A supplied token must match the claimed identity; a missing one is
    /// only accepted when tokens are not required.
    fn check_token(&self, identity: Identity, token: Option<&str>) -> Result<(), &'static str> {
        match token {
            None if self.config.require_token => Err("Token required"),
            None => Ok(()),
            Some(token) => match self.decoder.decode(token) {
                Ok(claims) if claims.identity() == identity => Ok(()),
                Ok(_) => Err("Token does not match identity"),
                Err(_) => Err("Invalid token"),
            },
        }
    }

    /// Open sockets, registered or not.
    pub fn connection_count(&self) -> usize {
        self.by_id.len()
    }

    /// Distinct identities with at least one socket.
    pub fn identity_count(&self) -> usize {
        self.by_identity.len()
    }

    /// Whether `identity` has a registered socket.
    pub fn is_online(&self, identity: Identity) -> bool {
        self.by_identity.contains_key(&identity)
    }
}
