//! MCG Quote API
//!
//! HTTP service exposing the freight and diagnostic engines.
//! Bind to 127.0.0.1 by default (internal only).

pub mod config;
mod error;
mod handlers;
mod state;
pub mod telemetry;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;
pub use handlers::{capture_lead, diagnostic_score, freight_quote, health, icms_table};
pub use state::AppState;

/// All routes, with CORS and request tracing.
pub fn router(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/api/v1/freight/icms", get(icms_table))
    .route("/api/v1/freight/quote", post(freight_quote))
    .route("/api/v1/diagnostic/score", post(diagnostic_score))
    .route("/api/v1/diagnostic/leads", post(capture_lead))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}
