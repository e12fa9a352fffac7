//! Client for the USGS FDSN event web service (GeoJSON format).

use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config::UsgsConfig;

#[derive(Debug, Error)]
pub enum UsgsError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

#[derive(Clone)]
pub struct UsgsClient {
    client: Client,
    base_url: String,
}

impl UsgsClient {
    pub fn new(config: &UsgsConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(concat!("temblor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build USGS HTTP client: {e}"))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn fetch_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        min_magnitude: f64,
    ) -> Result<Value, UsgsError> {
        let url = format!(
            "{}/query?format=geojson&starttime={}&endtime={}&minmagnitude={}",
            self.base_url, start, end, min_magnitude
        );
        self.get_json(&url).await
    }

    pub async fn fetch_by_magnitude_range(
        &self,
        min_magnitude: f64,
        max_magnitude: f64,
    ) -> Result<Value, UsgsError> {
        let url = format!(
            "{}/query?format=geojson&minmagnitude={}&maxmagnitude={}",
            self.base_url, min_magnitude, max_magnitude
        );
        self.get_json(&url).await
    }

    async fn get_json(&self, url: &str) -> Result<Value, UsgsError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(UsgsError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}
