//! Notification listing and read state.

pub mod service;

pub use service::NotificationService;
