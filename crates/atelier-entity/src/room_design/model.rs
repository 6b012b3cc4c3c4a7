//! Room design entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::product::PlacementType;

/// A generated room visualization featuring one product.
///
/// A single generation writes one row per selected product, all sharing
/// the same image.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RoomDesign {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub room_type: String,
    pub theme: String,
    pub style: String,
    pub placement_type: PlacementType,
    /// Image URL or `data:` URI.
    pub image_url: String,
    pub saved: bool,
    pub created_at: DateTime<Utc>,
}

/// Data required to store a design.
#[derive(Debug, Clone)]
pub struct CreateRoomDesign {
    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub room_type: String,
    pub theme: String,
    pub style: String,
    pub placement_type: PlacementType,
    pub image_url: String,
}
