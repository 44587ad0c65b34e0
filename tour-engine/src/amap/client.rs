//! Amap HTTP client.
//!
//! One shared `reqwest::Client` per `AmapClient`, with a semaphore capping
//! concurrent requests so batch fan-out stays under the provider's
//! queries-per-second quota.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use super::error::AmapError;
use super::types::{DirectionsResponse, GeocodeResponse, PoiSearchResponse};

/// Production base URLs for the three Amap API generations in use.
const DEFAULT_BASE_V3: &str = "https://restapi.amap.com/v3";
const DEFAULT_BASE_V4: &str = "https://restapi.amap.com/v4";
const DEFAULT_BASE_V5: &str = "https://restapi.amap.com/v5";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Path-based direction endpoints (single best path, no transit legs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMode {
    Driving,
    Walking,
    Cycling,
}

/// Configuration for the Amap client.
#[derive(Debug, Clone)]
pub struct AmapConfig {
    /// Web-service API key, appended to every request.
    pub api_key: String,
    pub base_v3: String,
    pub base_v4: String,
    pub base_v5: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl AmapConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_v3: DEFAULT_BASE_V3.to_string(),
            base_v4: DEFAULT_BASE_V4.to_string(),
            base_v5: DEFAULT_BASE_V5.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 15,
        }
    }

    /// Point all three API generations at one base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_v3 = url.clone();
        self.base_v4 = url.clone();
        self.base_v5 = url;
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Amap web-service API client.
#[derive(Debug, Clone)]
pub struct AmapClient {
    http: reqwest::Client,
    api_key: String,
    base_v3: String,
    base_v4: String,
    base_v5: String,
    semaphore: Arc<Semaphore>,
}

impl AmapClient {
    /// Create a new Amap client with the given configuration.
    ///
    /// Fails with `NotConfigured` if the API key is empty; a missing key
    /// should fail service construction, not individual requests.
    pub fn new(config: AmapConfig) -> Result<Self, AmapError> {
        if config.api_key.is_empty() {
            return Err(AmapError::NotConfigured("AMAP_API_KEY is not set".into()));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key,
            base_v3: config.base_v3,
            base_v4: config.base_v4,
            base_v5: config.base_v5,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// POI keyword search (V5), optionally scoped to a city.
    pub async fn text_search(
        &self,
        keywords: &str,
        city: &str,
        page_size: usize,
    ) -> Result<PoiSearchResponse, AmapError> {
        let mut params = vec![
            ("keywords", keywords.to_string()),
            ("page_size", page_size.to_string()),
            ("show_fields", "business".to_string()),
        ];
        if !city.is_empty() {
            params.push(("region", city.to_string()));
        }

        self.get_json(format!("{}/place/text", self.base_v5), params)
            .await
    }

    /// Geocode a text address (V3), optionally scoped to a city.
    pub async fn geocode(&self, address: &str, city: &str) -> Result<GeocodeResponse, AmapError> {
        let mut params = vec![("address", address.to_string())];
        if !city.is_empty() {
            params.push(("city", city.to_string()));
        }

        self.get_json(format!("{}/geocode/geo", self.base_v3), params)
            .await
    }

    /// Single-best-path directions for driving, walking or cycling.
    ///
    /// Coordinates are `"lng,lat"` strings.
    pub async fn directions(
        &self,
        mode: PathMode,
        origin: &str,
        destination: &str,
    ) -> Result<DirectionsResponse, AmapError> {
        let mut params = vec![
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
        ];

        let url = match mode {
            PathMode::Driving => {
                params.push(("strategy", "0".to_string()));
                params.push(("extensions", "all".to_string()));
                format!("{}/direction/driving", self.base_v3)
            }
            PathMode::Walking => {
                params.push(("extensions", "all".to_string()));
                format!("{}/direction/walking", self.base_v3)
            }
            // Cycling is the odd one out: V4, different error protocol.
            PathMode::Cycling => format!("{}/direction/bicycling", self.base_v4),
        };

        self.get_json(url, params).await
    }

    /// Integrated public-transit directions (V3).
    ///
    /// Requires the origin city; the destination city defaults to it.
    pub async fn transit_directions(
        &self,
        origin: &str,
        destination: &str,
        city: &str,
        city_dest: &str,
    ) -> Result<DirectionsResponse, AmapError> {
        let params = vec![
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
            ("city", city.to_string()),
            (
                "cityd",
                if city_dest.is_empty() { city } else { city_dest }.to_string(),
            ),
            ("strategy", "0".to_string()),
            ("extensions", "all".to_string()),
        ];

        self.get_json(
            format!("{}/direction/transit/integrated", self.base_v3),
            params,
        )
        .await
    }

    /// GET a URL, enforce the Amap JSON error protocol, decode the body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        mut params: Vec<(&'static str, String)>,
    ) -> Result<T, AmapError> {
        params.push(("key", self.api_key.clone()));

        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| AmapError::NotConfigured("client is shut down".into()))?;

        debug!(%url, "Amap request");

        let response = self.http.get(&url).query(&params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AmapError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| AmapError::Json {
                message: e.to_string(),
            })?;

        // V3/V5 protocol: status "1" success, "0" error.
        if value.get("status").and_then(|s| s.as_str()) == Some("0") {
            return Err(AmapError::Api {
                info: value
                    .get("info")
                    .and_then(|i| i.as_str())
                    .unwrap_or("unknown error")
                    .to_string(),
                code: value
                    .get("infocode")
                    .and_then(|c| c.as_str())
                    .unwrap_or_default()
                    .to_string(),
            });
        }

        // V4 protocol: errcode 0 success, anything else error.
        if let Some(errcode) = value.get("errcode").and_then(|c| c.as_i64()) {
            if errcode != 0 {
                return Err(AmapError::Api {
                    info: value
                        .get("errmsg")
                        .and_then(|m| m.as_str())
                        .unwrap_or("unknown error")
                        .to_string(),
                    code: errcode.to_string(),
                });
            }
        }

        serde_json::from_value(value).map_err(|e| AmapError::Json {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = AmapConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_max_concurrent(10)
            .with_timeout(60);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_v3, "http://localhost:8080");
        assert_eq!(config.base_v4, "http://localhost:8080");
        assert_eq!(config.base_v5, "http://localhost:8080");
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = AmapConfig::new("test-key");

        assert_eq!(config.base_v3, DEFAULT_BASE_V3);
        assert_eq!(config.base_v4, DEFAULT_BASE_V4);
        assert_eq!(config.base_v5, DEFAULT_BASE_V5);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, 15);
    }

    #[test]
    fn client_creation() {
        let client = AmapClient::new(AmapConfig::new("test-key"));
        assert!(client.is_ok());
    }

    #[test]
    fn empty_key_is_rejected() {
        let result = AmapClient::new(AmapConfig::new(""));
        assert!(matches!(result, Err(AmapError::NotConfigured(_))));
    }
}
