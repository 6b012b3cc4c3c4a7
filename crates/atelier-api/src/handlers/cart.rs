//! Shopping cart handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_entity::cart::{CartItem, CartLine};

use crate::dto::request::{AddToCartRequest, CustomerQuery, UpdateCartRequest};
use crate::dto::response::{ClearedResponse, SuccessResponse};
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

fn required_customer(query: &CustomerQuery) -> Result<Uuid, AppError> {
    query
        .customer_id
        .ok_or_else(|| AppError::validation("customerId is required"))
}

/// GET /api/cart?customerId
pub async fn list_cart(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<CustomerQuery>,
) -> Result<Json<Vec<CartLine>>, AppError> {
    let customer_id = required_customer(&query)?;
    Ok(Json(state.cart.list(&auth, customer_id).await?))
}

/// POST /api/cart
pub async fn add_to_cart(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<AddToCartRequest>,
) -> Result<(StatusCode, Json<CartItem>), AppError> {
    let item = state.cart.add(&auth, req.product_id, req.quantity).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/cart/{id}
pub async fn update_cart_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateCartRequest>,
) -> Result<Json<CartItem>, AppError> {
    Ok(Json(state.cart.update_quantity(&auth, id, req.quantity).await?))
}

/// DELETE /api/cart/{id}
pub async fn remove_cart_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.cart.remove(&auth, id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/cart?customerId
pub async fn clear_cart(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<CustomerQuery>,
) -> Result<Json<ClearedResponse>, AppError> {
    let customer_id = required_customer(&query)?;
    let removed = state.cart.clear(&auth, customer_id).await?;
    Ok(Json(ClearedResponse { removed }))
}
