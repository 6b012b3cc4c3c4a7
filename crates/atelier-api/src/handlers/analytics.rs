//! Retailer dashboard analytics.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_service::RetailerAnalytics;

use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/analytics/retailer/{retailerId}
pub async fn retailer_analytics(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(retailer_id): Path<Uuid>,
) -> Result<Json<RetailerAnalytics>, AppError> {
    Ok(Json(state.analytics.retailer(&auth, retailer_id).await?))
}
