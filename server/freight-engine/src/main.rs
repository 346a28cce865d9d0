//! Binary entrypoint: read one quote request from stdin, write one JSON object to stdout.
//!
//! Usage: `freight-engine [ICMS_TABLE.json]`. Without an argument the standard
//! interstate table is used. Rejected input is written as an ErrorOutput.

use freight_engine::{compute_freight_quote, ErrorOutput, FreightQuoteInput, IcmsTable, PricingConfig};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

fn main() {
  init_logging();
  if let Err(e) = run_binary() {
    tracing::error!("freight-engine error: {}", e);
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
  let table = match std::env::args().nth(1) {
    Some(path) => IcmsTable::from_path(path)?,
    None => IcmsTable::standard(),
  };
  let config = PricingConfig::default();

  let mut raw = String::new();
  io::stdin().lock().read_to_string(&mut raw)?;
  let input: FreightQuoteInput = serde_json::from_str(&raw)?;

  let json = match compute_freight_quote(&input, &table, &config) {
    Ok(result) => serde_json::to_vec(&result)?,
    Err(e) => {
      tracing::warn!(code = e.code(), field = e.field(), "quote rejected");
      serde_json::to_vec(&ErrorOutput::from(&e))?
    }
  };
  io::stdout().write_all(&json)?;
  Ok(())
}
