//! Customer and retailer profile handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_entity::user::{Customer, Retailer, UpdateCustomer, UpdateRetailer};

use crate::extractors::{AuthUser, JsonBody};
use crate::state::AppState;

/// GET /api/customers/{id}
pub async fn get_customer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, AppError> {
    Ok(Json(state.accounts.customer(&auth, id).await?))
}

/// PUT /api/customers/{id}
pub async fn update_customer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<UpdateCustomer>,
) -> Result<Json<Customer>, AppError> {
    Ok(Json(state.accounts.update_customer(&auth, id, req).await?))
}

/// GET /api/retailers/{id}
pub async fn get_retailer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Retailer>, AppError> {
    Ok(Json(state.accounts.retailer(&auth, id).await?))
}

/// PUT /api/retailers/{id}
pub async fn update_retailer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<UpdateRetailer>,
) -> Result<Json<Retailer>, AppError> {
    Ok(Json(state.accounts.update_retailer(&auth, id, req).await?))
}
