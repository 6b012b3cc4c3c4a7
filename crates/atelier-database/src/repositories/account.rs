//! Retailer and customer repositories.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use atelier_core::error::{AppError, ErrorKind};
use atelier_core::result::AppResult;
use atelier_entity::user::{
    CreateCustomer, CreateRetailer, Customer, Retailer, UpdateCustomer, UpdateRetailer,
};

use super::write_error;
use crate::store::{CustomerStore, RetailerStore};

/// Repository for retailer accounts.
#[derive(Debug, Clone)]
pub struct RetailerRepository {
    pool: PgPool,
}

impl RetailerRepository {
    /// Create a new retailer repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RetailerStore for RetailerRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Retailer>> {
        sqlx::query_as::<_, Retailer>("SELECT * FROM retailers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find retailer", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Retailer>> {
        sqlx::query_as::<_, Retailer>("SELECT * FROM retailers WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find retailer by email", e)
            })
    }

    async fn create(&self, data: CreateRetailer) -> AppResult<Retailer> {
        sqlx::query_as::<_, Retailer>(
            "INSERT INTO retailers (business_name, owner_name, email, password_hash, contact_number, address, gst_number, pan_number) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(&data.business_name)
        .bind(&data.owner_name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.contact_number)
        .bind(&data.address)
        .bind(&data.gst_number)
        .bind(&data.pan_number)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error("Failed to create retailer"))
    }

    async fn update(&self, id: Uuid, data: &UpdateRetailer) -> AppResult<Option<Retailer>> {
        sqlx::query_as::<_, Retailer>(
            "UPDATE retailers SET \
                business_name = COALESCE($2, business_name), \
                owner_name = COALESCE($3, owner_name), \
                email = COALESCE($4, email), \
                contact_number = COALESCE($5, contact_number), \
                address = COALESCE($6, address), \
                gst_number = COALESCE($7, gst_number), \
                pan_number = COALESCE($8, pan_number), \
                logo_url = COALESCE($9, logo_url), \
                about = COALESCE($10, about), \
                working_hours = COALESCE($11, working_hours), \
                bank_details = COALESCE($12, bank_details) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.business_name)
        .bind(&data.owner_name)
        .bind(&data.email)
        .bind(&data.contact_number)
        .bind(&data.address)
        .bind(&data.gst_number)
        .bind(&data.pan_number)
        .bind(&data.logo_url)
        .bind(&data.about)
        .bind(&data.working_hours)
        .bind(&data.bank_details)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error("Failed to update retailer"))
    }
}

/// Repository for customer accounts.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    /// Create a new customer repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerStore for CustomerRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Customer>> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find customer", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Customer>> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find customer by email", e)
            })
    }

    async fn create(&self, data: CreateCustomer) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(
            "INSERT INTO customers (name, email, password_hash, contact_number, address) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.contact_number)
        .bind(&data.address)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error("Failed to create customer"))
    }

    async fn update(&self, id: Uuid, data: &UpdateCustomer) -> AppResult<Option<Customer>> {
        sqlx::query_as::<_, Customer>(
            "UPDATE customers SET \
                name = COALESCE($2, name), \
                email = COALESCE($3, email), \
                contact_number = COALESCE($4, contact_number), \
                address = COALESCE($5, address) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.contact_number)
        .bind(&data.address)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error("Failed to update customer"))
    }
}
