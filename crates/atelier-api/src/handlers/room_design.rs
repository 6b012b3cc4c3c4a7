//! AI room design handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use atelier_core::error::AppError;
use atelier_entity::room_design::RoomDesign;

use crate::dto::request::{CreateRoomDesignRequest, CustomerQuery};
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/room-designs
pub async fn create_room_design(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateRoomDesignRequest>,
) -> Result<(StatusCode, Json<RoomDesign>), AppError> {
    let design = state.room_designs.generate(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(design)))
}

/// GET /api/room-designs?customerId
pub async fn list_room_designs(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<CustomerQuery>,
) -> Result<Json<Vec<RoomDesign>>, AppError> {
    let customer_id = query.customer_id.unwrap_or(auth.user_id());
    Ok(Json(state.room_designs.list(&auth, customer_id).await?))
}
