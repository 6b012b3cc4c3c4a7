//! Order and payment status enumerations.

use serde::{Deserialize, Serialize};

/// Fulfilment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, not yet confirmed by the retailer.
    #[default]
    Pending,
    /// Accepted by the retailer.
    Confirmed,
    /// Handed to the shipping partner.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Cancelled.
    Cancelled,
}

text_enum!(OrderStatus, "order status" {
    Pending => "pending",
    Confirmed => "confirmed",
    Shipped => "shipped",
    Delivered => "delivered",
    Cancelled => "cancelled",
});

impl OrderStatus {
    /// Orders still in flight (neither delivered nor cancelled).
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Delivered | Self::Cancelled)
    }
}

/// Payment state. Shared by orders and auctions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Awaiting payment.
    #[default]
    Pending,
    /// Paid.
    Completed,
    /// Payment failed.
    Failed,
}

text_enum!(PaymentStatus, "payment status" {
    Pending => "pending",
    Completed => "completed",
    Failed => "failed",
});
