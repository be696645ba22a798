//! Open-Meteo geocoding client

use std::time::Duration;

use async_trait::async_trait;
use domain::{ErrorKind, ToolError, ToolResult};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{Place, SearchResponse};

/// Geocoding client errors
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// The HTTP client could not be built
    #[error("Failed to initialize HTTP client: {0}")]
    ClientInit(String),

    /// The request did not produce a response
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a status other than 200
    #[error("Geocoding API error: {0}")]
    HttpStatus(u16),

    /// The body was not valid JSON of the expected shape
    #[error("Failed to parse JSON response from geocoding API: {0}")]
    Parse(String),

    /// The provider returned no candidates
    #[error("City not found")]
    NotFound,
}

impl GeocodingError {
    /// Failure category in the shared taxonomy
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ClientInit(_) => ErrorKind::Configuration,
            Self::Network(_) => ErrorKind::Network,
            Self::HttpStatus(_) => ErrorKind::HttpStatus,
            Self::Parse(_) => ErrorKind::JsonParse,
            Self::NotFound => ErrorKind::NoData,
        }
    }
}

impl From<GeocodingError> for ToolError {
    fn from(err: GeocodingError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

/// Geocoding service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Geocoding API base URL (default: <https://geocoding-api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Place name resolution
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a free-text place name to the provider's best match
    async fn resolve(&self, city_name: &str) -> ToolResult<Place>;
}

/// Open-Meteo geocoding client
#[derive(Debug)]
pub struct OpenMeteoGeocoder {
    client: Client,
    config: GeocodingConfig,
}

impl OpenMeteoGeocoder {
    /// Create a new geocoder with the given configuration
    pub fn new(config: GeocodingConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeocodingError::ClientInit(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn with_defaults() -> Result<Self, GeocodingError> {
        Self::new(GeocodingConfig::default())
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.config.base_url.trim_end_matches('/'))
    }

    async fn search(&self, city_name: &str) -> Result<Place, GeocodingError> {
        let url = self.search_url();
        debug!(url = %url, "Searching place name");

        let response = self
            .client
            .get(&url)
            .query(&[("name", city_name)])
            .send()
            .await
            .map_err(|e| GeocodingError::Network(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = %status, "Geocoding API returned non-OK status");
            return Err(GeocodingError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeocodingError::Network(e.to_string()))?;
        let body: SearchResponse =
            serde_json::from_str(&body).map_err(|e| GeocodingError::Parse(e.to_string()))?;

        let place = body.into_first().ok_or(GeocodingError::NotFound)?;
        debug!(place = %place, location = %place.location, "Resolved place");
        Ok(place)
    }
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    #[instrument(skip(self))]
    async fn resolve(&self, city_name: &str) -> ToolResult<Place> {
        Ok(self.search(city_name).await?)
    }
}
