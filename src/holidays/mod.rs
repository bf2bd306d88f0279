//! Public holiday lookup
//!
//! Holidays come from the Nager.Date API. Lookups never fail from the
//! caller's point of view: any transport or decoding problem is logged and
//! reported as "no holidays".

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::Result;
use crate::models::{Country, Holiday};

/// Configuration for the holiday service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HolidayConfig {
    /// API base URL (default: https://date.nager.at/api/v3)
    pub endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Country used when the caller does not name one
    pub default_country: String,
}

impl Default for HolidayConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://date.nager.at/api/v3".to_string(),
            timeout_secs: 15,
            default_country: "US".to_string(),
        }
    }
}

/// Source of public holidays
#[async_trait]
pub trait HolidayResolver: Send + Sync {
    /// Holidays for a year; empty on any failure
    async fn holidays(&self, year: i32, country_code: &str) -> Vec<Holiday>;

    /// Countries the service knows about; empty on any failure
    async fn available_countries(&self) -> Vec<Country> {
        Vec::new()
    }
}

/// Nager.Date API client
pub struct NagerClient {
    client: Client,
    config: HolidayConfig,
}

impl NagerClient {
    pub fn new(config: HolidayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Client pointed at another base URL, for mock servers
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        Self::new(HolidayConfig {
            endpoint: endpoint.into(),
            ..HolidayConfig::default()
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.endpoint.trim_end_matches('/'))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl HolidayResolver for NagerClient {
    async fn holidays(&self, year: i32, country_code: &str) -> Vec<Holiday> {
        let country = country_code.to_uppercase();
        let url = self.url(&format!("PublicHolidays/{year}/{country}"));

        match self.get_json::<Vec<Holiday>>(&url).await {
            Ok(holidays) => {
                tracing::debug!(year, country = %country, count = holidays.len(), "Fetched holidays");
                holidays
            }
            Err(e) => {
                tracing::warn!(year, country = %country, error = %e, "Holiday lookup failed, assuming none");
                crate::metrics::record_holiday_lookup_failure();
                Vec::new()
            }
        }
    }

    async fn available_countries(&self) -> Vec<Country> {
        match self.get_json::<Vec<Country>>(&self.url("AvailableCountries")).await {
            Ok(countries) => countries,
            Err(e) => {
                tracing::warn!(error = %e, "Country lookup failed");
                Vec::new()
            }
        }
    }
}

/// Fixed holiday list, for offline runs and tests
#[derive(Debug, Clone, Default)]
pub struct StaticHolidays {
    holidays: Vec<Holiday>,
}

impl StaticHolidays {
    pub fn new(holidays: Vec<Holiday>) -> Self {
        Self { holidays }
    }
}

#[async_trait]
impl HolidayResolver for StaticHolidays {
    async fn holidays(&self, year: i32, _country_code: &str) -> Vec<Holiday> {
        use chrono::Datelike;

        self.holidays
            .iter()
            .filter(|h| h.date.year() == year)
            .cloned()
            .collect()
    }
}
