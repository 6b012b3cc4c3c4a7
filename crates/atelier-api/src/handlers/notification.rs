//! Notification handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_entity::notification::Notification;
use atelier_entity::user::Identity;

use crate::dto::request::NotificationListQuery;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/notifications?userId&userType
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<NotificationListQuery>,
) -> Result<Json<Vec<Notification>>, AppError> {
    let (Some(user_id), Some(user_type)) = (query.user_id, query.user_type) else {
        return Err(AppError::validation("userId and userType required"));
    };
    let recipient = Identity::new(user_id, user_type);
    Ok(Json(state.notifications.list(&auth, recipient).await?))
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Notification>, AppError> {
    Ok(Json(state.notifications.mark_read(&auth, id).await?))
}
