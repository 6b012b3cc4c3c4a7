//! Real-time WebSocket configuration.

use serde::{Deserialize, Serialize};

/// Real-time (WebSocket) push configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Maximum open connections per `(userId, userType)` identity.
    /// Registering past the limit evicts the oldest connection.
    #[serde(default = "default_max_connections_per_identity")]
    pub max_connections_per_identity: usize,
    /// Outbound buffer per connection. Messages beyond it are dropped.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
    /// Require a bearer token in the `auth` handshake message.
    #[serde(default)]
    pub require_token: bool,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            max_connections_per_identity: default_max_connections_per_identity(),
            channel_buffer_size: default_channel_buffer(),
            require_token: false,
        }
    }
}

fn default_max_connections_per_identity() -> usize {
    5
}

fn default_channel_buffer() -> usize {
    256
}
