//! Catalog entities.

pub mod model;

pub use model::{CreateProduct, PlacementType, Product, ProductFilter, UpdateProduct};
