//! Order entities.

pub mod item;
pub mod model;
pub mod status;

pub use item::{CreateOrderItem, OrderItem};
pub use model::{CreateOrder, Order, OrderWithItems, UpdateOrder};
pub use status::{OrderStatus, PaymentStatus};
