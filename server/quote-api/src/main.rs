//! Binary entrypoint for the quote API.

use std::sync::Arc;
use tracing::info;

use quote_api::{telemetry, ApiConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  let config = ApiConfig::from_env()?;
  telemetry::init(&config.log_level)?;

  let icms = config.load_icms_table()?;
  info!(
    states = icms.len(),
    source = %config
      .icms_table_path
      .as_ref()
      .map(|p| p.display().to_string())
      .unwrap_or_else(|| "standard".to_string()),
    "ICMS table loaded"
  );

  let state = Arc::new(AppState {
    icms,
    pricing: config.pricing,
  });
  let app = quote_api::router(state);

  let addr = config.socket_addr()?;
  let listener = tokio::net::TcpListener::bind(addr).await?;
  info!(%addr, "quote-api listening");

  axum::serve(listener, app).await?;
  Ok(())
}
