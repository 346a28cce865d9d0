//! Structured error types for the freight engine.

use thiserror::Error;

/// Validation failures for a single quote. None are retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
  #[error("invalid state code: {field}: '{code}' is not in the ICMS table")]
  InvalidStateCode { field: String, code: String },

  #[error("invalid amount: {field}: {reason}")]
  InvalidAmount { field: String, reason: String },
}

impl PricingError {
  pub fn state_code(field: &str, code: &str) -> Self {
    Self::InvalidStateCode {
      field: field.to_string(),
      code: code.to_string(),
    }
  }

  pub fn amount(field: &str, reason: &str) -> Self {
    Self::InvalidAmount {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }

  /// Stable machine-readable code.
  pub fn code(&self) -> &'static str {
    match self {
      Self::InvalidStateCode { .. } => "invalid_state_code",
      Self::InvalidAmount { .. } => "invalid_amount",
    }
  }

  pub fn field(&self) -> &str {
    match self {
      Self::InvalidStateCode { field, .. } | Self::InvalidAmount { field, .. } => field,
    }
  }
}

/// Failures loading an ICMS table.
#[derive(Debug, Error)]
pub enum TableError {
  #[error("ICMS table: unknown UF code '{0}'")]
  UnknownState(String),

  #[error("ICMS table: UF '{0}' appears more than once")]
  DuplicateState(String),

  #[error("ICMS table: rate for {code} must be between 0% and 100%, got {rate}")]
  RateOutOfRange { code: String, rate: String },

  #[error("ICMS table: {0}")]
  Json(#[from] serde_json::Error),

  #[error("ICMS table: {path}: {source}")]
  Io {
    path: String,
    #[source]
    source: std::io::Error,
  },
}
