//! Inbound and outbound WebSocket message type definitions.
//!
//! Every frame is a JSON object tagged by `type` in snake_case; fields are
//! camelCase.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use atelier_entity::auction::{Auction, Bid};
use atelier_entity::negotiation::NegotiationMessage;
use atelier_entity::order::{Order, OrderWithItems};
use atelier_entity::user::UserType;

/// Messages sent by the client to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum InboundMessage {
    /// Join the registry under an identity.
    Auth {
        user_id: Uuid,
        user_type: UserType,
        /// Bearer token; mandatory when the server requires it.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<String>,
    },
    /// Liveness probe.
    Ping,
}

/// Messages sent by the server to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum OutboundMessage {
    /// Reply to a successful `auth`.
    AuthSuccess,
    /// Reply to `ping`.
    Pong,
    /// A checkout included the retailer's products. Carries only that
    /// retailer's items.
    NewOrder { order: OrderWithItems },
    /// The customer's order changed status.
    OrderUpdate { order: Order },
    /// A retailer bid on the customer's auction.
    NewBid { auction_id: Uuid, bid: Bid },
    /// The retailer won an auction.
    AuctionWon { auction: Auction },
    /// A message arrived in a negotiation thread.
    NewMessage {
        negotiation_id: Uuid,
        message: NegotiationMessage,
    },
    /// Protocol error.
    Error { code: String, message: String },
}

impl OutboundMessage {
    /// Build an error frame.
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.to_string(),
            message: message.into(),
        }
    }

    /// The `type` tag, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AuthSuccess => "auth_success",
            Self::Pong => "pong",
            Self::NewOrder { .. } => "new_order",
            Self::OrderUpdate { .. } => "order_update",
            Self::NewBid { .. } => "new_bid",
            Self::AuctionWon { .. } => "auction_won",
            Self::NewMessage { .. } => "new_message",
            Self::Error { .. } => "error",
        }
    }
}
