//! Notification entities.

pub mod model;

pub use model::{CreateNotification, Notification, NotificationKind};
