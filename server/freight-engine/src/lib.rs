//! MCG Freight Pricing Engine: deterministic freight quotes with ICMS, GRIS,
//! ADV, and toll components.
//!
//! No DB, no network. The ICMS table and surcharge config are passed in by
//! the caller; nothing here holds state between calls.

pub mod config;
pub mod error;
pub mod icms;
pub mod money;
pub mod quote;
pub mod types;
pub mod uf;

pub use config::PricingConfig;
pub use error::{PricingError, TableError};
pub use icms::IcmsTable;
pub use money::{Money, Rate, Weight};
pub use quote::compute_freight_quote;
pub use types::{ErrorOutput, FreightQuoteInput, FreightQuoteResult};
pub use uf::{Region, Uf};
