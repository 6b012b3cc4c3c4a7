//! Marketing campaign handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_entity::campaign::{Campaign, UpdateCampaign};
use atelier_service::CampaignQuery;

use crate::dto::request::{CampaignListQuery, CreateCampaignRequest};
use crate::extractors::{AuthUser, JsonBody, ValidatedJson};
use crate::state::AppState;

/// GET /api/campaigns?retailerId|active
pub async fn list_campaigns(
    State(state): State<AppState>,
    Query(query): Query<CampaignListQuery>,
) -> Result<Json<Vec<Campaign>>, AppError> {
    let query = CampaignQuery {
        retailer_id: query.retailer_id,
        active: query.active,
    };
    Ok(Json(state.campaigns.list(query).await?))
}

/// POST /api/campaigns
pub async fn create_campaign(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<Campaign>), AppError> {
    let campaign = state.campaigns.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(campaign)))
}

/// PUT /api/campaigns/{id}
pub async fn update_campaign(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    JsonBody(req): JsonBody<UpdateCampaign>,
) -> Result<Json<Campaign>, AppError> {
    Ok(Json(state.campaigns.update(&auth, id, req).await?))
}
