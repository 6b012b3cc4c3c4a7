//! Product entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Where a product sits in a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "placement_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PlacementType {
    /// Hung on a wall.
    Wall,
    /// Stands on the floor.
    Floor,
}

text_enum!(PlacementType, "placement type" {
    Wall => "wall",
    Floor => "floor",
});

/// A product listed by a retailer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: Uuid,
    /// The owning retailer.
    pub retailer_id: Uuid,
    /// Product name.
    pub name: String,
    /// Long description.
    pub description: Option<String>,
    /// Category label.
    pub category: String,
    /// Unit price.
    pub price: Decimal,
    /// Units in stock.
    pub stock_quantity: i32,
    /// Main image URL.
    pub image_url: Option<String>,
    /// Specifications (JSON text).
    pub specifications: Option<String>,
    /// Suggested room (Living Room, Bedroom, ...).
    pub placement: Option<String>,
    /// Wall or floor item.
    pub placement_type: PlacementType,
    /// When the product was listed.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether a search term matches name, description or category,
    /// ignoring case.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.category.to_lowercase().contains(&term)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&term))
    }
}

/// Data required to list a product.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub retailer_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
    pub specifications: Option<String>,
    pub placement: Option<String>,
    pub placement_type: PlacementType,
}

/// Partial product update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
    pub image_url: Option<String>,
    pub specifications: Option<String>,
    pub placement: Option<String>,
    pub placement_type: Option<PlacementType>,
}

impl UpdateProduct {
    /// Whether the update carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.stock_quantity.is_none()
            && self.image_url.is_none()
            && self.specifications.is_none()
            && self.placement.is_none()
            && self.placement_type.is_none()
    }
}

/// Listing filter. Present criteria are combined with AND; `search` is a
/// case-insensitive substring match over name, description and category.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    pub retailer_id: Option<Uuid>,
    pub category: Option<String>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: Uuid::new_v4(),
            retailer_id: Uuid::new_v4(),
            name: "Velvet Chaise".to_string(),
            description: Some("Hand-tufted lounge chair".to_string()),
            category: "Seating".to_string(),
            price: Decimal::new(125000, 2),
            stock_quantity: 4,
            image_url: None,
            specifications: None,
            placement: Some("Living Room".to_string()),
            placement_type: PlacementType::Floor,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_matches_search_is_case_insensitive() {
        let product = sample();
        assert!(product.matches_search("velvet"));
        assert!(product.matches_search("TUFTED"));
        assert!(product.matches_search("seat"));
        assert!(!product.matches_search("marble"));
    }

    #[test]
    fn test_placement_type_roundtrip() {
        assert_eq!("wall".parse::<PlacementType>().unwrap(), PlacementType::Wall);
        assert_eq!(PlacementType::Floor.to_string(), "floor");
    }
}
