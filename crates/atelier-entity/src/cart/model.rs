//! Cart item entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::product::Product;

/// One pending purchase in a customer's cart.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Unique cart item identifier.
    pub id: Uuid,
    /// Cart owner.
    pub customer_id: Uuid,
    /// Product to buy.
    pub product_id: Uuid,
    /// Units to buy.
    pub quantity: i32,
    /// When the item was added.
    pub created_at: DateTime<Utc>,
}

/// A cart item joined with its product (absent if the product was deleted).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub item: CartItem,
    pub product: Option<Product>,
}

/// Data required to add an item to a cart.
#[derive(Debug, Clone)]
pub struct CreateCartItem {
    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
}
