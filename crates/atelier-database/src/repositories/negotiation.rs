//! Negotiation repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use atelier_core::error::{AppError, ErrorKind};
use atelier_core::result::AppResult;
use atelier_entity::negotiation::{
    CreateNegotiation, CreateNegotiationMessage, Negotiation, NegotiationMessage,
    NegotiationStatus,
};

use crate::store::NegotiationStore;

/// Repository for negotiation threads and their messages.
#[derive(Debug, Clone)]
pub struct NegotiationRepository {
    pool: PgPool,
}

impl NegotiationRepository {
    /// Create a new negotiation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NegotiationStore for NegotiationRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Negotiation>> {
        sqlx::query_as::<_, Negotiation>("SELECT * FROM negotiations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find negotiation", e))
    }

    async fn list_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<Negotiation>> {
        sqlx::query_as::<_, Negotiation>(
            "SELECT * FROM negotiations WHERE customer_id = $1 ORDER BY created_at DESC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list negotiations", e))
    }

    async fn list_by_retailer(&self, retailer_id: Uuid) -> AppResult<Vec<Negotiation>> {
        sqlx::query_as::<_, Negotiation>(
            "SELECT * FROM negotiations WHERE retailer_id = $1 ORDER BY created_at DESC",
        )
        .bind(retailer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list negotiations", e))
    }

    async fn create(&self, data: CreateNegotiation) -> AppResult<Negotiation> {
        sqlx::query_as::<_, Negotiation>(
            "INSERT INTO negotiations (customer_id, retailer_id, product_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.customer_id)
        .bind(data.retailer_id)
        .bind(data.product_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create negotiation", e))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: NegotiationStatus,
    ) -> AppResult<Option<Negotiation>> {
        sqlx::query_as::<_, Negotiation>(
            "UPDATE negotiations SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update negotiation", e))
    }

    async fn messages(&self, negotiation_id: Uuid) -> AppResult<Vec<NegotiationMessage>> {
        sqlx::query_as::<_, NegotiationMessage>(
            "SELECT * FROM negotiation_messages WHERE negotiation_id = $1 ORDER BY created_at, id",
        )
        .bind(negotiation_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list messages", e))
    }

    async fn add_message(&self, data: CreateNegotiationMessage) -> AppResult<NegotiationMessage> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let message = sqlx::query_as::<_, NegotiationMessage>(
            "INSERT INTO negotiation_messages (negotiation_id, sender_id, sender_type, message, offer_price) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.negotiation_id)
        .bind(data.sender_id)
        .bind(data.sender_type)
        .bind(&data.message)
        .bind(data.offer_price)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create message", e))?;

        if data.offer_price.is_some() {
            sqlx::query("UPDATE negotiations SET status = $2 WHERE id = $1")
                .bind(data.negotiation_id)
                .bind(NegotiationStatus::Pending)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update negotiation", e)
                })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit message", e)
        })?;

        Ok(message)
    }
}
