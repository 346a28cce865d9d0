//! Service configuration from the environment, with sane defaults.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use freight_engine::{IcmsTable, PricingConfig, Rate, TableError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("{var}: '{value}' is not a valid port")]
  InvalidPort { var: &'static str, value: String },

  #[error("{var}: '{value}' is not an IP address")]
  InvalidHost { var: &'static str, value: String },

  #[error("{var}: '{value}' must be a percentage between 0 and 100")]
  InvalidRate { var: &'static str, value: String },
}

/// Settings for the quote API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub host: String,
  pub port: u16,
  /// JSON ICMS table; the standard interstate table when unset.
  pub icms_table_path: Option<PathBuf>,
  pub pricing: PricingConfig,
  /// Fallback filter when RUST_LOG is unset.
  pub log_level: String,
}

impl ApiConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    dotenvy::dotenv().ok();
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Build from any key lookup (the environment in production, a map in tests).
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
    let host = lookup("QUOTE_API_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
    let port = match lookup("PORT") {
      Some(value) => value
        .trim()
        .parse::<u16>()
        .map_err(|_| ConfigError::InvalidPort { var: "PORT", value })?,
      None => 5005,
    };

    let icms_table_path = lookup("ICMS_TABLE_PATH")
      .filter(|p| !p.trim().is_empty())
      .map(PathBuf::from);

    let defaults = PricingConfig::default();
    let pricing = PricingConfig {
      gris_rate: rate_var(&lookup, "FREIGHT_GRIS_PERCENT", defaults.gris_rate)?,
      adv_rate: rate_var(&lookup, "FREIGHT_ADV_PERCENT", defaults.adv_rate)?,
    };

    let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

    Ok(Self {
      host,
      port,
      icms_table_path,
      pricing,
      log_level,
    })
  }

  pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
    let ip: IpAddr = if self.host.eq_ignore_ascii_case("localhost") {
      IpAddr::from([127, 0, 0, 1])
    } else {
      self.host.parse().map_err(|_| ConfigError::InvalidHost {
        var: "QUOTE_API_HOST",
        value: self.host.clone(),
      })?
    };
    Ok(SocketAddr::new(ip, self.port))
  }

  pub fn load_icms_table(&self) -> Result<IcmsTable, TableError> {
    match &self.icms_table_path {
      Some(path) => IcmsTable::from_path(path),
      None => Ok(IcmsTable::standard()),
    }
  }
}

fn rate_var(
  lookup: &impl Fn(&str) -> Option<String>,
  var: &'static str,
  default: Rate,
) -> Result<Rate, ConfigError> {
  let Some(value) = lookup(var) else {
    return Ok(default);
  };
  match Rate::parse_percent(&value) {
    Ok(rate) if rate.is_valid() => Ok(rate),
    _ => Err(ConfigError::InvalidRate { var, value }),
  }
}
