//! Input/output types for the freight engine (JSON contract with the web layer).

use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::money::{Money, Rate, Weight};
use crate::uf::Uf;

/// One quote request. State codes stay raw strings so a bad code surfaces as
/// `InvalidStateCode` rather than a JSON error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreightQuoteInput {
  pub origin: String,
  pub destination: String,
  pub weight_kg: Weight,
  pub declared_value: Money,
  pub axles: i64,
  #[serde(default)]
  pub toll_per_axle: Money,
  /// Frete-peso price per tonne. No weight charge when absent.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub freight_rate_per_ton: Option<Money>,
}

/// A computed quote. Components are truncated to centavos; `total` is the
/// exact sum rounded half-up once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreightQuoteResult {
  pub origin: Uf,
  pub destination: Uf,
  pub icms_rate: Rate,
  pub gris_rate: Rate,
  pub adv_rate: Rate,
  pub freight_weight: Money,
  pub icms: Money,
  pub gris: Money,
  pub adv: Money,
  pub toll: Money,
  pub total: Money,
  pub explanations: Vec<String>,
}

impl FreightQuoteResult {
  /// Sum of the reported (truncated) components.
  pub fn components_sum(&self) -> Money {
    Money::from_cents(
      self.freight_weight.cents()
        + self.icms.cents()
        + self.gris.cents()
        + self.adv.cents()
        + self.toll.cents(),
    )
  }
}

/// Structured error output for rejected input.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub code: String,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      error: true,
      code: code.into(),
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}

impl From<&PricingError> for ErrorOutput {
  fn from(err: &PricingError) -> Self {
    ErrorOutput::new(err.code(), err.to_string()).with_field(err.field())
  }
}
