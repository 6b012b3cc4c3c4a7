//! Health check handlers.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::dto::response::{DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

/// GET /api/health/detailed
pub async fn health_detailed(State(state): State<AppState>) -> Json<DetailedHealthResponse> {
    let database = match &state.database {
        None => "memory",
        Some(pool) => match pool.health_check().await {
            Ok(true) => "connected",
            Ok(false) => "unreachable",
            Err(e) => {
                warn!(error = %e, "Database health check failed");
                "unreachable"
            }
        },
    };
    let status = if database == "unreachable" { "degraded" } else { "ok" };

    Json(DetailedHealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        database: database.to_string(),
        ws_connections: state.registry.connection_count(),
        online_identities: state.registry.identity_count(),
    })
}
