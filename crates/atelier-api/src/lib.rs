//! # atelier-api
//!
//! HTTP API layer for the Atelier marketplace built on Axum.
//!
//! Provides the REST endpoints under `/api`, the `/ws` upgrade,
//! middleware (request logging, CORS), extractors and DTOs. Errors are
//! rendered by `AppError`'s `IntoResponse` impl in `atelier-core`.

pub mod app;
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
