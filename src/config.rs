//! # Configuration
//!
//! Settings for the gateway, the quoting run, and the warehouse roster.
//!
//! Settings load from an optional TOML file merged with environment
//! variables under the `FREIGHT_RFQ` prefix, with `__` separating nested
//! keys. A `.env` file is honoured when present so credentials can stay out
//! of both the TOML file and the shell profile:
//!
//! ```text
//! FREIGHT_RFQ__GATEWAY__APP_TOKEN=...
//! FREIGHT_RFQ__GATEWAY__APP_KEY=...
//! ```
//!
//! Everything is validated before use: the endpoint must be a parseable
//! URL, credentials must be present, timeouts must be positive and within
//! the vendor's 30-second ceiling, and warehouse codes must be non-blank
//! and unique.

use std::collections::HashSet;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use crate::application::{RateShopConfig, Warehouse};
use crate::domain::value_objects::{CountryCode, WarehouseCode};

/// Default config file stem, resolved relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "freight-rfq";

/// Ceiling on the gateway timeout. The vendor drops connections held open
/// longer than this, so allowing more would only mask the failure.
pub const MAX_GATEWAY_TIMEOUT_MS: u64 = 30_000;

fn default_gateway_timeout_ms() -> u64 {
    10_000
}

fn default_per_channel_timeout_ms() -> u64 {
    10_000
}

fn default_country() -> String {
    "US".to_string()
}

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source failed to load or deserialize.
    #[error("configuration source error: {0}")]
    Source(#[from] config::ConfigError),

    /// Settings loaded but violate a constraint.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// SOAP gateway endpoint and credentials.
    pub gateway: GatewaySettings,
    /// Quoting run parameters.
    #[serde(default)]
    pub quoting: QuotingSettings,
    /// Warehouses to price from, in display order. Must not be empty.
    #[serde(default)]
    pub warehouses: Vec<WarehouseEntry>,
}

/// Connection settings for the vendor's SOAP endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewaySettings {
    /// Full URL of the `callService` endpoint.
    pub endpoint: String,
    /// Account token issued by the vendor.
    pub app_token: String,
    /// Account key issued by the vendor.
    pub app_key: String,
    /// Whole-request timeout in milliseconds.
    #[serde(default = "default_gateway_timeout_ms")]
    pub timeout_ms: u64,
}

/// Parameters of the quoting run itself.
#[derive(Debug, Clone, Deserialize)]
pub struct QuotingSettings {
    /// Destination country code.
    #[serde(default = "default_country")]
    pub country: String,
    /// Budget for a single channel's quote, in milliseconds.
    #[serde(default = "default_per_channel_timeout_ms")]
    pub per_channel_timeout_ms: u64,
    /// Cap on how many listed channels are priced per warehouse.
    #[serde(default)]
    pub max_channels: Option<usize>,
}

impl Default for QuotingSettings {
    fn default() -> Self {
        Self {
            country: default_country(),
            per_channel_timeout_ms: default_per_channel_timeout_ms(),
            max_channels: None,
        }
    }
}

/// One warehouse in the roster.
#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseEntry {
    /// Vendor warehouse code, e.g. `USEA`.
    pub code: String,
    /// Optional human-readable label, carried into per-warehouse results.
    #[serde(default)]
    pub label: Option<String>,
}

impl Settings {
    /// Loads settings from the default file location and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to load or the merged
    /// settings fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Loads settings from a specific file stem and the environment.
    ///
    /// The file is optional; environment variables alone can configure
    /// everything.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to load or the merged
    /// settings fail validation.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let settings: Self = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("FREIGHT_RFQ")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Checks the invariants the rest of the crate relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first violated
    /// constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        reqwest::Url::parse(&self.gateway.endpoint).map_err(|e| {
            ConfigError::Invalid(format!("gateway.endpoint is not a valid url: {e}"))
        })?;
        if self.gateway.app_token.trim().is_empty() {
            return Err(ConfigError::Invalid("gateway.app_token is empty".into()));
        }
        if self.gateway.app_key.trim().is_empty() {
            return Err(ConfigError::Invalid("gateway.app_key is empty".into()));
        }
        if self.gateway.timeout_ms == 0 {
            return Err(ConfigError::Invalid("gateway.timeout_ms must be positive".into()));
        }
        if self.gateway.timeout_ms > MAX_GATEWAY_TIMEOUT_MS {
            return Err(ConfigError::Invalid(format!(
                "gateway.timeout_ms must not exceed {MAX_GATEWAY_TIMEOUT_MS}ms"
            )));
        }

        if self.quoting.country.trim().is_empty() {
            return Err(ConfigError::Invalid("quoting.country is empty".into()));
        }
        if self.quoting.per_channel_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "quoting.per_channel_timeout_ms must be positive".into(),
            ));
        }

        if self.warehouses.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one warehouse must be configured".into(),
            ));
        }
        let mut seen = HashSet::new();
        for entry in &self.warehouses {
            let code = entry.code.trim();
            if code.is_empty() {
                return Err(ConfigError::Invalid("warehouse code is blank".into()));
            }
            if !seen.insert(code) {
                return Err(ConfigError::Invalid(format!(
                    "warehouse code '{code}' is configured twice"
                )));
            }
        }

        Ok(())
    }

    /// Builds the engine configuration these settings describe.
    #[must_use]
    pub fn rate_shop_config(&self) -> RateShopConfig {
        let warehouses = self
            .warehouses
            .iter()
            .map(|entry| {
                let warehouse = Warehouse::new(WarehouseCode::new(entry.code.trim()));
                match entry.label.as_deref().map(str::trim) {
                    Some(label) if !label.is_empty() => warehouse.with_label(label),
                    _ => warehouse,
                }
            })
            .collect();

        let config = RateShopConfig::new(CountryCode::new(self.quoting.country.trim()), warehouses)
            .with_per_channel_timeout(self.quoting.per_channel_timeout_ms);

        match self.quoting.max_channels {
            Some(max) => config.with_max_channels(max),
            None => config,
        }
    }
}
