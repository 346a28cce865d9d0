//! HTTP handlers for the quote API.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use std::sync::Arc;

use diagnostic_engine::{DiagnosticRequest, DiagnosticScore, LeadRecord, LeadSubmission};
use freight_engine::{FreightQuoteInput, FreightQuoteResult, IcmsTable};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn health() -> &'static str {
  "ok"
}

pub async fn icms_table(State(state): State<Arc<AppState>>) -> Json<IcmsTable> {
  Json(state.icms.clone())
}

pub async fn freight_quote(
  State(state): State<Arc<AppState>>,
  Json(input): Json<FreightQuoteInput>,
) -> Result<Json<FreightQuoteResult>, ApiError> {
  let result = freight_engine::compute_freight_quote(&input, &state.icms, &state.pricing)?;
  Ok(Json(result))
}

pub async fn diagnostic_score(
  Json(request): Json<DiagnosticRequest>,
) -> Result<Json<DiagnosticScore>, ApiError> {
  let score = diagnostic_engine::compute_diagnostic_score(&request.answers)?;
  Ok(Json(score))
}

pub async fn capture_lead(
  Json(submission): Json<LeadSubmission>,
) -> Result<(StatusCode, Json<LeadRecord>), ApiError> {
  let record = diagnostic_engine::capture_lead(&submission, Utc::now())?;
  tracing::info!(lead_id = %record.lead_id, tier = record.score.tier.as_str(), "lead captured");
  Ok((StatusCode::CREATED, Json(record)))
}
