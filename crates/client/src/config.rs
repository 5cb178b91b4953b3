//! Client configuration.

use atelier_shared::AppConfig;
use chrono_tz::Tz;

/// Client configuration for talking to the backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "http://localhost:5000/api").
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout: u64,

    /// Correct stale purchase order headers when they are loaded.
    pub sync_totals_on_read: bool,

    /// Province/ward dataset URL.
    pub address_dataset_url: String,

    /// Business timezone; decides order days and voucher status.
    pub timezone: Tz,
}

impl ClientConfig {
    /// Create a new client configuration with defaults.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            sync_totals_on_read: true,
            address_dataset_url: "https://provinces.open-api.vn/api/?depth=2".to_string(),
            timezone: chrono_tz::Asia::Ho_Chi_Minh,
        }
    }

    /// Build from the loaded application configuration.
    pub fn from_app(config: &AppConfig) -> Self {
        Self {
            base_url: config.backend.base_url.clone(),
            timeout: config.backend.timeout_secs,
            sync_totals_on_read: config.backend.sync_totals_on_read,
            address_dataset_url: config.address.dataset_url.clone(),
            timezone: config.business.tz(),
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Enable or disable header correction on read.
    #[must_use]
    pub fn with_sync_totals_on_read(mut self, enabled: bool) -> Self {
        self.sync_totals_on_read = enabled;
        self
    }

    /// Set the address dataset URL.
    #[must_use]
    pub fn with_address_dataset(mut self, url: impl Into<String>) -> Self {
        self.address_dataset_url = url.into();
        self
    }

    /// Set the business timezone.
    #[must_use]
    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.timezone = tz;
        self
    }

    /// Today's date in the business timezone.
    #[must_use]
    pub fn today(&self) -> chrono::NaiveDate {
        chrono::Utc::now().with_timezone(&self.timezone).date_naive()
    }
}
