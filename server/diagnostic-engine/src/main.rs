//! Binary entrypoint: read one JSON object from stdin, write one to stdout.
//!
//! Input is either `{ "answers": {...} }` (score only) or a lead submission
//! (has an `email` field), which is scored and returned as a LeadRecord.
//! Rejected input is written as an ErrorOutput.

use chrono::Utc;
use diagnostic_engine::{
  capture_lead, compute_diagnostic_score, DiagnosticRequest, ErrorOutput, LeadSubmission,
};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

fn main() {
  init_logging();
  if let Err(e) = run_binary() {
    tracing::error!("diagnostic-engine error: {}", e);
    std::process::exit(1);
  }
}

/// Logs go to stderr so stdout stays a single JSON document.
fn init_logging() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .with_target(false)
    .compact()
    .try_init();
}

fn run_binary() -> Result<(), Box<dyn std::error::Error>> {
  let mut raw = String::new();
  io::stdin().lock().read_to_string(&mut raw)?;
  let value: serde_json::Value = serde_json::from_str(&raw)?;

  // Typed structs are decoded from the raw text: a `Value` would already
  // have collapsed repeated answer keys.
  let outcome = if value.get("email").is_some() {
    let submission: LeadSubmission = serde_json::from_str(&raw)?;
    capture_lead(&submission, Utc::now()).map(|record| serde_json::to_vec(&record))
  } else {
    let request: DiagnosticRequest = serde_json::from_str(&raw)?;
    compute_diagnostic_score(&request.answers).map(|score| serde_json::to_vec(&score))
  };

  let json = match outcome {
    Ok(encoded) => encoded?,
    Err(e) => {
      tracing::warn!(code = e.code(), field = %e.field(), "diagnostic rejected");
      serde_json::to_vec(&ErrorOutput::from(&e))?
    }
  };
  io::stdout().write_all(&json)?;
  Ok(())
}
