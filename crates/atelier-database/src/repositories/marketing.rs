//! Review and campaign repositories.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use atelier_core::error::{AppError, ErrorKind};
use atelier_core::result::AppResult;
use atelier_entity::campaign::{Campaign, CampaignStatus, CreateCampaign, UpdateCampaign};
use atelier_entity::review::{CreateReview, Review, UpdateReview};

use crate::store::{CampaignStore, ReviewStore};

/// Repository for product reviews.
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    /// Create a new review repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewStore for ReviewRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Review>> {
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find review", e))
    }

    async fn list_by_product(&self, product_id: Uuid) -> AppResult<Vec<Review>> {
        sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE product_id = $1 ORDER BY review_date DESC",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list reviews", e))
    }

    async fn list_by_retailer(&self, retailer_id: Uuid) -> AppResult<Vec<Review>> {
        sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE retailer_id = $1 ORDER BY review_date DESC",
        )
        .bind(retailer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list reviews", e))
    }

    async fn create(&self, data: CreateReview) -> AppResult<Review> {
        sqlx::query_as::<_, Review>(
            "INSERT INTO reviews (customer_id, customer_name, retailer_id, product_id, product_name, rating, comment) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(data.customer_id)
        .bind(&data.customer_name)
        .bind(data.retailer_id)
        .bind(data.product_id)
        .bind(&data.product_name)
        .bind(data.rating)
        .bind(&data.comment)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create review", e))
    }

    async fn update(&self, id: Uuid, data: &UpdateReview) -> AppResult<Option<Review>> {
        sqlx::query_as::<_, Review>(
            "UPDATE reviews SET response = COALESCE($2, response), status = COALESCE($3, status) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.response)
        .bind(data.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update review", e))
    }
}

/// Repository for marketing campaigns.
#[derive(Debug, Clone)]
pub struct CampaignRepository {
    pool: PgPool,
}

impl CampaignRepository {
    /// Create a new campaign repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CampaignStore for CampaignRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Campaign>> {
        sqlx::query_as::<_, Campaign>("SELECT * FROM campaigns WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find campaign", e))
    }

    async fn list_by_retailer(&self, retailer_id: Uuid) -> AppResult<Vec<Campaign>> {
        sqlx::query_as::<_, Campaign>(
            "SELECT * FROM campaigns WHERE retailer_id = $1 ORDER BY created_at DESC",
        )
        .bind(retailer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list campaigns", e))
    }

    async fn list_active(&self) -> AppResult<Vec<Campaign>> {
        sqlx::query_as::<_, Campaign>(
            "SELECT * FROM campaigns WHERE status = $1 ORDER BY created_at DESC",
        )
        .bind(CampaignStatus::Active)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list active campaigns", e)
        })
    }

    async fn create(&self, data: CreateCampaign) -> AppResult<Campaign> {
        sqlx::query_as::<_, Campaign>(
            "INSERT INTO campaigns (retailer_id, name, start_date, end_date, discount_percentage, products_included, banner_image_url, status, visibility_level) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(data.retailer_id)
        .bind(&data.name)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.discount_percentage)
        .bind(&data.products_included)
        .bind(&data.banner_image_url)
        .bind(data.status)
        .bind(data.visibility_level)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create campaign", e))
    }

    async fn update(&self, id: Uuid, data: &UpdateCampaign) -> AppResult<Option<Campaign>> {
        sqlx::query_as::<_, Campaign>(
            "UPDATE campaigns SET \
                name = COALESCE($2, name), \
                start_date = COALESCE($3, start_date), \
                end_date = COALESCE($4, end_date), \
                discount_percentage = COALESCE($5, discount_percentage), \
                products_included = COALESCE($6, products_included), \
                banner_image_url = COALESCE($7, banner_image_url), \
                status = COALESCE($8, status), \
                visibility_level = COALESCE($9, visibility_level) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.discount_percentage)
        .bind(&data.products_included)
        .bind(&data.banner_image_url)
        .bind(data.status)
        .bind(data.visibility_level)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update campaign", e))
    }
}
