//! Durable notifications plus live push.

pub mod dispatcher;

pub use dispatcher::NotificationDispatcher;
