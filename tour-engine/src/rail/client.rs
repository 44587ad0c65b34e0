//! Rail ticket bridge HTTP client.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use super::error::RailError;
use super::types::{StationDto, TicketDto};

/// Configuration for the rail client.
///
/// There is no public default endpoint; the bridge URL always comes from
/// deployment configuration.
#[derive(Debug, Clone)]
pub struct RailConfig {
    /// Base URL of the ticket bridge service.
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RailConfig {
    /// Create a new config with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for a 12306-style rail ticket bridge.
#[derive(Debug, Clone)]
pub struct RailClient {
    http: reqwest::Client,
    base_url: String,
}

impl RailClient {
    /// Create a new rail client with the given configuration.
    pub fn new(config: RailConfig) -> Result<Self, RailError> {
        if config.base_url.is_empty() {
            return Err(RailError::NotConfigured("RAIL_API_URL is not set".into()));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Look up station codes for a batch of candidate names.
    ///
    /// Names are joined with `|` into one request; the response maps each
    /// recognised name to its station record. Unrecognised names are
    /// simply absent.
    pub async fn station_codes(
        &self,
        names: &[String],
    ) -> Result<HashMap<String, StationDto>, RailError> {
        let url = format!("{}/v1/stations/codes", self.base_url);
        self.get_json(&url, &[("names", names.join("|"))]).await
    }

    /// List all stations in a city.
    pub async fn stations_in_city(&self, city: &str) -> Result<Vec<StationDto>, RailError> {
        let url = format!("{}/v1/stations/city", self.base_url);
        self.get_json(&url, &[("city", city.to_string())]).await
    }

    /// Query train tickets between two station codes on a date.
    pub async fn query_tickets(
        &self,
        date: NaiveDate,
        from_code: &str,
        to_code: &str,
    ) -> Result<Vec<TicketDto>, RailError> {
        let url = format!("{}/v1/tickets", self.base_url);
        self.get_json(
            &url,
            &[
                ("date", date.format("%Y-%m-%d").to_string()),
                ("from_station", from_code.to_string()),
                ("to_station", to_code.to_string()),
            ],
        )
        .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, RailError> {
        let response = self.http.get(url).query(params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RailError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| RailError::Json {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = RailConfig::new("http://localhost:8183");
        assert_eq!(config.base_url, "http://localhost:8183");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let result = RailClient::new(RailConfig::new(""));
        assert!(matches!(result, Err(RailError::NotConfigured(_))));
    }

    #[test]
    fn client_creation() {
        let client = RailClient::new(RailConfig::new("http://localhost:8183"));
        assert!(client.is_ok());
    }
}
