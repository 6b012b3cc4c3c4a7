//! Cart operations for the owning customer.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_database::store::{CartStore, ProductStore};
use atelier_entity::cart::{CartItem, CartLine, CreateCartItem};
use atelier_entity::user::Identity;

use crate::context::RequestContext;

#[derive(Clone)]
pub struct CartService {
    cart: Arc<dyn CartStore>,
    products: Arc<dyn ProductStore>,
}

impl CartService {
    /// Creates a new cart service.
    pub fn new(cart: Arc<dyn CartStore>, products: Arc<dyn ProductStore>) -> Self {
        Self { cart, products }
    }

    /// The customer's cart with products joined.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        customer_id: Uuid,
    ) -> Result<Vec<CartLine>, AppError> {
        ctx.ensure_is(Identity::customer(customer_id))?;
        self.cart.list_by_customer(customer_id).await
    }

    /// Adds a product to the caller's cart, merging into an existing line.
    pub async fn add(
        &self,
        ctx: &RequestContext,
        product_id: Uuid,
        quantity: Option<i32>,
    ) -> Result<CartItem, AppError> {
        let customer_id = ctx.require_customer()?;
        let quantity = quantity.unwrap_or(1);
        check_quantity(quantity)?;
        if self.products.find_by_id(product_id).await?.is_none() {
            return Err(AppError::not_found("Product not found"));
        }

        let item = self
            .cart
            .add(CreateCartItem {
                customer_id,
                product_id,
                quantity,
            })
            .await?;
        debug!(cart_item_id = %item.id, customer_id = %customer_id, "Added to cart");
        Ok(item)
    }

    /// Changes the quantity of one line.
    pub async fn update_quantity(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        quantity: i32,
    ) -> Result<CartItem, AppError> {
        check_quantity(quantity)?;
        self.owned(ctx, id).await?;
        self.cart
            .update_quantity(id, quantity)
            .await?
            .ok_or_else(|| AppError::not_found("Cart item not found"))
    }

    /// Removes one line.
    pub async fn remove(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.owned(ctx, id).await?;
        if !self.cart.delete(id).await? {
            return Err(AppError::not_found("Cart item not found"));
        }
        Ok(())
    }

    /// Empties the customer's cart. Returns the number of removed lines.
    pub async fn clear(&self, ctx: &RequestContext, customer_id: Uuid) -> Result<u64, AppError> {
        ctx.ensure_is(Identity::customer(customer_id))?;
        let removed = self.cart.clear(customer_id).await?;
        info!(customer_id = %customer_id, removed, "Cart cleared");
        Ok(removed)
    }

    async fn owned(&self, ctx: &RequestContext, id: Uuid) -> Result<CartItem, AppError> {
        let item = self
            .cart
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Cart item not found"))?;
        if !ctx.is_customer(item.customer_id) {
            return Err(AppError::authorization("Not your cart"));
        }
        Ok(item)
    }
}

fn check_quantity(quantity: i32) -> Result<(), AppError> {
    if quantity < 1 {
        return Err(AppError::validation("Quantity must be at least 1"));
    }
    Ok(())
}
