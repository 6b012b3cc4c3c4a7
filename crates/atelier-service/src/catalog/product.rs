//! Product catalog management.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_database::store::ProductStore;
use atelier_entity::money;
use atelier_entity::product::{CreateProduct, PlacementType, Product, ProductFilter, UpdateProduct};

use crate::context::RequestContext;

/// Data for listing a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: Decimal,
    pub stock_quantity: Option<i32>,
    pub image_url: Option<String>,
    pub specifications: Option<String>,
    pub placement: Option<String>,
    pub placement_type: PlacementType,
}

/// Public catalog reads and retailer-owned writes.
#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductStore>,
}

impl ProductService {
    /// Creates a new product service.
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    /// Lists products matching `filter`, newest first.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, AppError> {
        self.products.list(filter).await
    }

    /// Fetches one product.
    pub async fn get(&self, id: Uuid) -> Result<Product, AppError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))
    }

    /// Lists a product under the calling retailer.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        data: NewProduct,
    ) -> Result<Product, AppError> {
        let retailer_id = ctx.require_retailer()?;
        require_text(&data.name, "Product name")?;
        require_text(&data.category, "Category")?;
        check_amounts(Some(data.price), data.stock_quantity)?;

        let product = self
            .products
            .create(CreateProduct {
                retailer_id,
                name: data.name,
                description: data.description,
                category: data.category,
                price: money::normalize(data.price),
                stock_quantity: data.stock_quantity.unwrap_or(0),
                image_url: data.image_url,
                specifications: data.specifications,
                placement: data.placement,
                placement_type: data.placement_type,
            })
            .await?;

        info!(product_id = %product.id, retailer_id = %retailer_id, "Product created");
        Ok(product)
    }

    /// Updates a product owned by the caller.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        mut data: UpdateProduct,
    ) -> Result<Product, AppError> {
        if data.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }
        if let Some(name) = &data.name {
            require_text(name, "Product name")?;
        }
        check_amounts(data.price, data.stock_quantity)?;
        data.price = data.price.map(money::normalize);

        self.owned(ctx, id).await?;
        let product = self
            .products
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))?;

        info!(product_id = %id, "Product updated");
        Ok(product)
    }

    /// Deletes a product owned by the caller.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.owned(ctx, id).await?;
        if !self.products.delete(id).await? {
            return Err(AppError::not_found("Product not found"));
        }
        info!(product_id = %id, "Product deleted");
        Ok(())
    }

    async fn owned(&self, ctx: &RequestContext, id: Uuid) -> Result<Product, AppError> {
        let product = self.get(id).await?;
        if !ctx.is_retailer(product.retailer_id) {
            return Err(AppError::authorization("Not your product"));
        }
        Ok(product)
    }
}

fn require_text(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(())
}

fn check_amounts(price: Option<Decimal>, stock: Option<i32>) -> Result<(), AppError> {
    if price.is_some_and(|p| p.is_sign_negative()) {
        return Err(AppError::validation("Price cannot be negative"));
    }
    if stock.is_some_and(|s| s < 0) {
        return Err(AppError::validation("Stock quantity cannot be negative"));
    }
    Ok(())
}
