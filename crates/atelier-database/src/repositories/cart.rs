//! Cart repository.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use atelier_core::error::{AppError, ErrorKind};
use atelier_core::result::AppResult;
use atelier_entity::cart::{CartItem, CartLine, CreateCartItem};
use atelier_entity::product::Product;

use crate::store::CartStore;

/// Repository for cart items.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: PgPool,
}

impl CartRepository {
    /// Create a new cart repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartStore for CartRepository {
    async fn list_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<CartLine>> {
        let items = sqlx::query_as::<_, CartItem>(
            "SELECT * FROM cart_items WHERE customer_id = $1 ORDER BY created_at, id",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list cart", e))?;

        let product_ids: Vec<Uuid> = items.iter().map(|i| i.product_id).collect();
        let products: HashMap<Uuid, Product> =
            sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ANY($1)")
                .bind(&product_ids)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to load cart products", e)
                })?
                .into_iter()
                .map(|p| (p.id, p))
                .collect();

        Ok(items
            .into_iter()
            .map(|item| CartLine {
                product: products.get(&item.product_id).cloned(),
                item,
            })
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CartItem>> {
        sqlx::query_as::<_, CartItem>("SELECT * FROM cart_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find cart item", e))
    }

    async fn add(&self, data: CreateCartItem) -> AppResult<CartItem> {
        sqlx::query_as::<_, CartItem>(
            r#"
            INSERT INTO cart_items (customer_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (customer_id, product_id)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
            RETURNING *
            "#,
        )
        .bind(data.customer_id)
        .bind(data.product_id)
        .bind(data.quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add cart item", e))
    }

    async fn update_quantity(&self, id: Uuid, quantity: i32) -> AppResult<Option<CartItem>> {
        sqlx::query_as::<_, CartItem>(
            "UPDATE cart_items SET quantity = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update cart item", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete cart item", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self, customer_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM cart_items WHERE customer_id = $1")
            .bind(customer_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to clear cart", e))?;
        Ok(result.rows_affected())
    }
}
