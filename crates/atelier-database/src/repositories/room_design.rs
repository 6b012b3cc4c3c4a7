//! Room design repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use atelier_core::error::{AppError, ErrorKind};
use atelier_core::result::AppResult;
use atelier_entity::room_design::{CreateRoomDesign, RoomDesign};

use crate::store::RoomDesignStore;

/// Repository for generated room designs.
#[derive(Debug, Clone)]
pub struct RoomDesignRepository {
    pool: PgPool,
}

impl RoomDesignRepository {
    /// Create a new room design repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomDesignStore for RoomDesignRepository {
    async fn list_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<RoomDesign>> {
        sqlx::query_as::<_, RoomDesign>(
            "SELECT * FROM room_designs WHERE customer_id = $1 ORDER BY created_at DESC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list room designs", e))
    }

    async fn create_many(&self, designs: Vec<CreateRoomDesign>) -> AppResult<Vec<RoomDesign>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let mut created = Vec::with_capacity(designs.len());
        for design in designs {
            let row = sqlx::query_as::<_, RoomDesign>(
                "INSERT INTO room_designs (customer_id, product_id, room_type, theme, style, placement_type, image_url) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
            )
            .bind(design.customer_id)
            .bind(design.product_id)
            .bind(&design.room_type)
            .bind(&design.theme)
            .bind(&design.style)
            .bind(design.placement_type)
            .bind(&design.image_url)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to create room design", e)
            })?;
            created.push(row);
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit room designs", e)
        })?;
        Ok(created)
    }
}
