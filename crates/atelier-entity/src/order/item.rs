//! Order line items.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One `(order, product)` line. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Unique item identifier.
    pub id: Uuid,
    /// Parent order.
    pub order_id: Uuid,
    /// Purchased product.
    pub product_id: Uuid,
    /// Product name at purchase time.
    pub product_name: String,
    /// Retailer selling this line.
    pub retailer_id: Uuid,
    /// Units purchased.
    pub quantity: i32,
    /// Unit price at purchase time.
    pub price: Decimal,
    /// `price × quantity`.
    pub subtotal: Decimal,
    /// When the line was written.
    pub created_at: DateTime<Utc>,
}

/// A line to be written with its order. The subtotal is computed by the
/// service, never taken from the client.
#[derive(Debug, Clone)]
pub struct CreateOrderItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub retailer_id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
    pub subtotal: Decimal,
}
