//! Product repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use atelier_core::error::{AppError, ErrorKind};
use atelier_core::result::AppResult;
use atelier_entity::product::{CreateProduct, Product, ProductFilter, UpdateProduct};

use crate::store::ProductStore;

/// Repository for the product catalog.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find product", e))
    }

    async fn find_many(&self, ids: &[Uuid]) -> AppResult<Vec<Product>> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load products", e))
    }

    async fn list(&self, filter: &ProductFilter) -> AppResult<Vec<Product>> {
        let pattern = filter.search.as_ref().map(|s| format!("%{}%", s.to_lowercase()));
        sqlx::query_as::<_, Product>(
            "SELECT * FROM products \
             WHERE ($1::uuid IS NULL OR retailer_id = $1) \
               AND ($2::text IS NULL OR category = $2) \
               AND ($3::text IS NULL \
                    OR LOWER(name) LIKE $3 \
                    OR LOWER(category) LIKE $3 \
                    OR LOWER(COALESCE(description, '')) LIKE $3) \
             ORDER BY created_at DESC",
        )
        .bind(filter.retailer_id)
        .bind(&filter.category)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list products", e))
    }

    async fn create(&self, data: CreateProduct) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            "INSERT INTO products (retailer_id, name, description, category, price, stock_quantity, image_url, specifications, placement, placement_type) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(data.retailer_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.category)
        .bind(data.price)
        .bind(data.stock_quantity)
        .bind(&data.image_url)
        .bind(&data.specifications)
        .bind(&data.placement)
        .bind(data.placement_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create product", e))
    }

    async fn update(&self, id: Uuid, data: &UpdateProduct) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>(
            "UPDATE products SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                category = COALESCE($4, category), \
                price = COALESCE($5, price), \
                stock_quantity = COALESCE($6, stock_quantity), \
                image_url = COALESCE($7, image_url), \
                specifications = COALESCE($8, specifications), \
                placement = COALESCE($9, placement), \
                placement_type = COALESCE($10, placement_type) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.category)
        .bind(data.price)
        .bind(data.stock_quantity)
        .bind(&data.image_url)
        .bind(&data.specifications)
        .bind(&data.placement)
        .bind(data.placement_type)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update product", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete product", e))?;
        Ok(result.rows_affected() > 0)
    }
}
