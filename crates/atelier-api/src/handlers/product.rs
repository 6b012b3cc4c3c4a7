//! Product catalog handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_entity::product::{Product, ProductFilter, UpdateProduct};

use crate::dto::request::CreateProductRequest;
use crate::dto::response::SuccessResponse;
use crate::extractors::{AuthUser, JsonBody, ValidatedJson};
use crate::state::AppState;

/// GET /api/products?retailerId&category&search
pub async fn list_products(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.products.list(&filter).await?))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, AppError> {
    Ok(Json(state.products.get(id).await?))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = state.products.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<UpdateProduct>,
) -> Result<Json<Product>, AppError> {
    Ok(Json(state.products.update(&auth, id, req).await?))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.products.delete(&auth, id).await?;
    Ok(Json(SuccessResponse::ok()))
}
