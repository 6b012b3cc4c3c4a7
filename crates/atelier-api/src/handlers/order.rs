//! Order handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_entity::order::{Order, OrderWithItems, UpdateOrder};
use atelier_service::OrderQuery;

use crate::dto::request::{CreateOrderRequest, OrderListQuery};
use crate::extractors::{AuthUser, JsonBody, ValidatedJson};
use crate::state::AppState;

/// GET /api/orders?customerId&retailerId
pub async fn list_orders(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Vec<OrderWithItems>>, AppError> {
    let query = OrderQuery {
        customer_id: query.customer_id,
        retailer_id: query.retailer_id,
    };
    Ok(Json(state.orders.list(&auth, query).await?))
}

/// GET /api/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderWithItems>, AppError> {
    Ok(Json(state.orders.get(&auth, id).await?))
}

/// POST /api/orders
pub async fn create_order(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderWithItems>), AppError> {
    let (order, lines) = req.into_parts();
    let placed = state.orders.place(&auth, order, lines).await?;
    Ok((StatusCode::CREATED, Json(placed)))
}

/// PUT /api/orders/{id}
pub async fn update_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<UpdateOrder>,
) -> Result<Json<Order>, AppError> {
    Ok(Json(state.orders.update(&auth, id, req).await?))
}
