//! # atelier-realtime
//!
//! Live push for the marketplace.
//!
//! A WebSocket starts anonymous and joins the [`ConnectionRegistry`] under
//! an [`Identity`](atelier_entity::user::Identity) when it sends an `auth`
//! message. Services push through the [`NotificationDispatcher`], which
//! writes the durable notification row first and then fans the live
//! message out to every socket of the recipient.

pub mod connection;
pub mod message;
pub mod notification;

pub use connection::{ConnectionHandle, ConnectionId, ConnectionRegistry};
pub use message::{InboundMessage, OutboundMessage};
pub use notification::NotificationDispatcher;
