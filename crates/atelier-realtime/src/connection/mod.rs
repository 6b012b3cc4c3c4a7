//! Connection handles and the identity registry.

pub mod handle;
pub mod registry;

pub use handle::{ConnectionHandle, ConnectionId};
pub use registry::ConnectionRegistry;
