//! Surcharge configuration with sane defaults.

use serde::{Deserialize, Serialize};

use crate::money::Rate;

/// Surcharge rates applied to the declared cargo value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
  /// GRIS (cargo risk) as a share of declared value.
  pub gris_rate: Rate,
  /// ADV (ad valorem insurance) as a share of declared value.
  pub adv_rate: Rate,
}

impl Default for PricingConfig {
  fn default() -> Self {
    Self {
      gris_rate: Rate::from_ppm(1_000),
      adv_rate: Rate::from_ppm(500),
    }
  }
}
