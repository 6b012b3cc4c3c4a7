//! Product review handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use atelier_core::error::AppError;
use atelier_entity::review::{Review, UpdateReview};
use atelier_service::ReviewQuery;

use crate::dto::request::{CreateReviewRequest, ReviewListQuery, UpdateReviewRequest};
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/reviews?productId|retailerId
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(query): Query<ReviewListQuery>,
) -> Result<Json<Vec<Review>>, AppError> {
    let query = ReviewQuery {
        product_id: query.product_id,
        retailer_id: query.retailer_id,
    };
    Ok(Json(state.reviews.list(query).await?))
}

/// POST /api/reviews
pub async fn create_review(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    let review = state
        .reviews
        .create(&auth, req.product_id, req.rating, req.comment)
        .await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// PUT /api/reviews/{id}
pub async fn update_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateReviewRequest>,
) -> Result<Json<Review>, AppError> {
    let update = UpdateReview {
        response: req.response,
        status: req.status,
    };
    Ok(Json(state.reviews.update(&auth, id, update).await?))
}
