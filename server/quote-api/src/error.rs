//! HTTP error mapping for engine failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use diagnostic_engine::ScoringError;
use freight_engine::PricingError;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// Request-level failures. All are caller mistakes, so all map to 422.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Pricing(#[from] PricingError),

  #[error(transparent)]
  Scoring(#[from] ScoringError),
}

impl ApiError {
  fn code(&self) -> &'static str {
    match self {
      Self::Pricing(e) => e.code(),
      Self::Scoring(e) => e.code(),
    }
  }

  fn field(&self) -> String {
    match self {
      Self::Pricing(e) => e.field().to_string(),
      Self::Scoring(e) => e.field(),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let code = self.code();
    let field = self.field();
    warn!(code, %field, "request rejected: {}", self);

    let body = Json(json!({
      "error": true,
      "code": code,
      "message": self.to_string(),
      "field": field,
    }));
    (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
  }
}
