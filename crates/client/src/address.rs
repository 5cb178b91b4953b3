//! Province/ward dataset.
//!
//! The dataset comes from a public third-party API and is read only. It is
//! fetched on first use and kept for the life of the directory; later calls
//! never hit the network again.

use std::time::Duration;

use atelier_shared::text::{contains_folded, fold};
use serde::Deserialize;
use tokio::sync::OnceCell;

use crate::wire::envelope::Envelope;
use crate::{ClientConfig, ClientError, ClientResult};

/// A ward (or district, in older datasets).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ward {
    /// Dataset code.
    pub code: i64,
    /// Display name.
    pub name: String,
}

/// A province with its wards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Province {
    /// Dataset code.
    pub code: i64,
    /// Display name.
    pub name: String,
    /// Wards, empty when the dataset was fetched without depth.
    #[serde(default, alias = "districts")]
    pub wards: Vec<Ward>,
}

/// Lazily fetched address dataset.
#[derive(Debug)]
pub struct AddressDirectory {
    client: reqwest::Client,
    url: String,
    provinces: OnceCell<Vec<Province>>,
}

impl AddressDirectory {
    /// Creates a directory reading from the configured dataset URL.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            url: config.address_dataset_url.clone(),
            provinces: OnceCell::new(),
        })
    }

    /// All provinces, fetching the dataset on first call.
    pub async fn provinces(&self) -> ClientResult<&[Province]> {
        let provinces = self
            .provinces
            .get_or_try_init(|| async {
                tracing::info!(url = %self.url, "Fetching address dataset");
                let response = self.client.get(&self.url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(ClientError::Rejected {
                        status: status.as_u16(),
                        message: status
                            .canonical_reason()
                            .unwrap_or("address dataset unavailable")
                            .to_string(),
                    });
                }
                let body = response.bytes().await?;
                let envelope: Envelope<Province> = serde_json::from_slice(&body)?;
                Ok(envelope.into_vec())
            })
            .await?;
        Ok(provinces)
    }

    /// Finds a province by name, ignoring case and diacritics.
    ///
    /// An exact folded match wins over a partial one, so "Hà Nội" does not
    /// pick a province merely containing it.
    pub async fn find_province(&self, name: &str) -> ClientResult<Option<&Province>> {
        let needle = fold(name.trim());
        if needle.is_empty() {
            return Ok(None);
        }
        let provinces = self.provinces().await?;
        Ok(provinces
            .iter()
            .find(|p| fold(&p.name) == needle)
            .or_else(|| provinces.iter().find(|p| contains_folded(&p.name, &needle))))
    }

    /// Wards of the province with `code`.
    pub async fn wards_of(&self, code: i64) -> ClientResult<&[Ward]> {
        Ok(self
            .provinces()
            .await?
            .iter()
            .find(|p| p.code == code)
            .map_or(&[][..], |p| p.wards.as_slice()))
    }
}

/// Joins the non-blank address parts with `", "`.
#[must_use]
pub fn format_address(street: &str, ward: Option<&Ward>, province: Option<&Province>) -> String {
    [
        Some(street.trim()),
        ward.map(|w| w.name.trim()),
        province.map(|p| p.name.trim()),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ")
}
