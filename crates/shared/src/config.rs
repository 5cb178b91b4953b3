//! Application configuration management.

use std::path::PathBuf;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Backend REST API configuration.
    pub backend: BackendConfig,
    /// Third-party address dataset configuration.
    #[serde(default)]
    pub address: AddressConfig,
    /// Session persistence configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Business calendar configuration.
    #[serde(default)]
    pub business: BusinessConfig,
}

/// Backend REST API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend (e.g., `http://localhost:5000/api`).
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Push a corrected header when a loaded purchase order's stored totals
    /// differ from the totals recomputed from its lines.
    #[serde(default = "default_sync_totals_on_read")]
    pub sync_totals_on_read: bool,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_sync_totals_on_read() -> bool {
    true
}

/// Address dataset configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressConfig {
    /// URL returning the province list with nested wards.
    #[serde(default = "default_address_url")]
    pub dataset_url: String,
}

fn default_address_url() -> String {
    "https://provinces.open-api.vn/api/?depth=2".to_string()
}

impl Default for AddressConfig {
    fn default() -> Self {
        Self {
            dataset_url: default_address_url(),
        }
    }
}

/// Session persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// File holding the bearer token and cached profile between runs.
    #[serde(default = "default_session_file")]
    pub file: PathBuf,
}

fn default_session_file() -> PathBuf {
    PathBuf::from(".atelier-session.json")
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: default_session_file(),
        }
    }
}

/// Business calendar configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BusinessConfig {
    /// IANA timezone used to decide what "today" is.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "Asia/Ho_Chi_Minh".to_string()
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

impl BusinessConfig {
    /// Parses the configured timezone, falling back to Vietnam time.
    #[must_use]
    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or_else(|_| {
            tracing::warn!(timezone = %self.timezone, "Unknown timezone, using Asia/Ho_Chi_Minh");
            chrono_tz::Asia::Ho_Chi_Minh
        })
    }

    /// Returns the current calendar date in the business timezone.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        chrono::Utc::now().with_timezone(&self.tz()).date_naive()
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("ATELIER").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
