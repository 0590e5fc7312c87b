//! Application configuration management.

use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Tax rate configuration.
    #[serde(default)]
    pub tax: TaxConfig,
    /// Accounting calendar configuration.
    #[serde(default)]
    pub accounting: AccountingConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Default tax rates, in percent.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxConfig {
    /// VAT rate applied when a document does not specify one.
    #[serde(default = "default_vat_rate")]
    pub vat_rate: Decimal,
    /// Withholding tax rate for services.
    #[serde(default = "default_wht_rate")]
    pub wht_rate: Decimal,
}

fn default_vat_rate() -> Decimal {
    Decimal::new(70, 1)
}

fn default_wht_rate() -> Decimal {
    Decimal::new(30, 1)
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            vat_rate: default_vat_rate(),
            wht_rate: default_wht_rate(),
        }
    }
}

/// Accounting calendar configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountingConfig {
    /// IANA time zone that business dates are evaluated in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "Asia/Bangkok".to_string()
}

impl Default for AccountingConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

impl AccountingConfig {
    /// Parses the configured time zone.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` if the name is not a known IANA zone.
    pub fn tz(&self) -> AppResult<Tz> {
        self.timezone.parse::<Tz>().map_err(|e| {
            AppError::Configuration(format!("invalid timezone '{}': {e}", self.timezone))
        })
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Fallback filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "thaibooks=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default.toml`,
    /// `config/{RUN_MODE}.toml`, then `THAIBOOKS__*` environment variables
    /// (e.g. `THAIBOOKS__DATABASE__URL`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("THAIBOOKS").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
