//! Shared, read-only application state.

use freight_engine::{IcmsTable, PricingConfig};

/// Built once at startup; handlers only read it.
#[derive(Debug, Clone, Default)]
pub struct AppState {
  pub icms: IcmsTable,
  pub pricing: PricingConfig,
}
