//! Negotiation thread handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_entity::negotiation::{Negotiation, NegotiationMessage};
use atelier_service::NegotiationQuery;

use crate::dto::request::{
    NegotiationListQuery, OpenNegotiationRequest, SendMessageRequest, UpdateNegotiationRequest,
};
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/negotiations?customerId&retailerId
pub async fn list_negotiations(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<NegotiationListQuery>,
) -> Result<Json<Vec<Negotiation>>, AppError> {
    let query = NegotiationQuery {
        customer_id: query.customer_id,
        retailer_id: query.retailer_id,
    };
    Ok(Json(state.negotiations.list(&auth, query).await?))
}

/// POST /api/negotiations
pub async fn open_negotiation(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<OpenNegotiationRequest>,
) -> Result<(StatusCode, Json<Negotiation>), AppError> {
    let negotiation = state
        .negotiations
        .open(&auth, req.product_id, req.retailer_id)
        .await?;
    Ok((StatusCode::CREATED, Json(negotiation)))
}

/// GET /api/negotiations/{id}
pub async fn get_negotiation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Negotiation>, AppError> {
    Ok(Json(state.negotiations.get(&auth, id).await?))
}

/// PUT /api/negotiations/{id}
pub async fn update_negotiation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateNegotiationRequest>,
) -> Result<Json<Negotiation>, AppError> {
    Ok(Json(state.negotiations.update_status(&auth, id, req.status).await?))
}

/// GET /api/negotiations/{id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<NegotiationMessage>>, AppError> {
    Ok(Json(state.negotiations.messages(&auth, id).await?))
}

/// POST /api/negotiations/{id}/messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<SendMessageRequest>,
) -> Result<(StatusCode, Json<NegotiationMessage>), AppError> {
    let message = state
        .negotiations
        .send_message(&auth, id, req.message, req.offer_price)
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}
