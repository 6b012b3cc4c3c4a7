//! Auth handlers: register, login, logout, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use atelier_core::error::AppError;

use crate::dto::request::{CustomerRegisterRequest, LoginRequest, RetailerRegisterRequest};
use crate::dto::response::{MeResponse, MessageResponse, SessionResponse};
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/customer/register
pub async fn register_customer(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CustomerRegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let session = state.accounts.register_customer(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse::customer(session, true, "Registration successful")),
    ))
}

/// POST /api/auth/retailer/register
pub async fn register_retailer(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RetailerRegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let session = state.accounts.register_retailer(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse::retailer(session, true, "Registration successful")),
    ))
}

/// POST /api/auth/customer/login
pub async fn login_customer(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.accounts.login_customer(&req.email, &req.password).await?;
    Ok(Json(SessionResponse::customer(session, false, "Login successful")))
}

/// POST /api/auth/retailer/login
pub async fn login_retailer(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.accounts.login_retailer(&req.email, &req.password).await?;
    Ok(Json(SessionResponse::retailer(session, false, "Login successful")))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; the client discards its copy.
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::new("Logout successful"))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MeResponse>, AppError> {
    let user = state.accounts.me(&auth).await?;
    Ok(Json(MeResponse { user }))
}
