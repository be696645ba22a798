//! Open-Meteo weather client
//!
//! HTTP client for the Open-Meteo forecast endpoint.

use std::time::Duration;

use async_trait::async_trait;
use domain::{ErrorKind, ToolError, ToolResult};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{ApiResponse, CurrentWeather, CurrentWeatherData, Forecast};

/// Number of days requested when the caller does not choose
pub const DEFAULT_FORECAST_DAYS: u8 = 3;

/// Largest accepted day count for [`WeatherClient::forecast`]
pub const MAX_FORECAST_DAYS: u8 = 10;

const DAILY_METRICS: &str = "temperature_2m_max,temperature_2m_min,precipitation_probability_max";

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The HTTP client could not be built
    #[error("Failed to initialize HTTP client: {0}")]
    ClientInit(String),

    /// The request did not produce a response
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a status other than 200
    #[error("API error: HTTP {0}")]
    HttpStatus(u16),

    /// The body was not valid JSON of the expected shape
    #[error("Failed to parse JSON response from weather API")]
    Parse(String),

    /// The response had no usable `current_weather` block
    #[error("No current weather data returned")]
    NoCurrentWeather,

    /// The response had an empty daily time series
    #[error("No forecast data returned")]
    NoForecast,

    /// Requested day count is outside `1..=MAX_FORECAST_DAYS`
    #[error("days must be between 1 and 10")]
    InvalidDays(u8),
}

impl WeatherError {
    /// Failure category in the shared taxonomy
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ClientInit(_) => ErrorKind::Configuration,
            Self::Network(_) => ErrorKind::Network,
            Self::HttpStatus(_) => ErrorKind::HttpStatus,
            Self::Parse(_) => ErrorKind::JsonParse,
            Self::NoCurrentWeather | Self::NoForecast => ErrorKind::NoData,
            Self::InvalidDays(_) => ErrorKind::Validation,
        }
    }
}

impl From<WeatherError> for ToolError {
    fn from(err: WeatherError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Weather lookups for a coordinate
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get current conditions
    async fn current(&self, latitude: f64, longitude: f64) -> ToolResult<CurrentWeather>;

    /// Get a daily forecast for `days` days (`1..=10`)
    async fn forecast(&self, latitude: f64, longitude: f64, days: u8) -> ToolResult<Forecast>;
}

/// Open-Meteo HTTP client implementation
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ClientInit(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    pub fn with_defaults() -> Result<Self, WeatherError> {
        Self::new(WeatherConfig::default())
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast", self.config.base_url.trim_end_matches('/'))
    }

    /// GET the forecast endpoint and decode the body.
    ///
    /// Transport, status and decoding failures all come back as
    /// [`WeatherError`]; nothing else in this client touches the response.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        query: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let url = self.forecast_url();
        debug!(url = %url, ?query, "Requesting Open-Meteo");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = %status, "Weather API returned non-OK status");
            return Err(WeatherError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| {
            debug!(error = %e, "Weather response did not decode");
            WeatherError::Parse(e.to_string())
        })
    }

    async fn fetch_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentWeather, WeatherError> {
        let query = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("current_weather", "true".to_string()),
            ("timezone", "auto".to_string()),
        ];

        let response: ApiResponse = self.fetch_json(&query).await?;

        response
            .current_weather
            .and_then(CurrentWeatherData::into_current)
            .ok_or(WeatherError::NoCurrentWeather)
    }

    async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Result<Forecast, WeatherError> {
        if !(1..=MAX_FORECAST_DAYS).contains(&days) {
            return Err(WeatherError::InvalidDays(days));
        }

        let query = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("daily", DAILY_METRICS.to_string()),
            ("timezone", "auto".to_string()),
            ("forecast_days", days.to_string()),
        ];

        let response: ApiResponse = self.fetch_json(&query).await?;

        let daily = response.daily.unwrap_or_default();
        if daily.is_empty() {
            return Err(WeatherError::NoForecast);
        }

        Ok(Forecast {
            days: daily.into_days(usize::from(days)),
        })
    }
}

#[async_trait]
impl WeatherClient for OpenMeteoClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn current(&self, latitude: f64, longitude: f64) -> ToolResult<CurrentWeather> {
        Ok(self.fetch_current(latitude, longitude).await?)
    }

    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude, days = %days))]
    async fn forecast(&self, latitude: f64, longitude: f64, days: u8) -> ToolResult<Forecast> {
        Ok(self.fetch_forecast(latitude, longitude, days).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_config_defaults() {
        let config = WeatherConfig::default();
        assert_eq!(config.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_config_deserialization_with_defaults() {
        let config: WeatherConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_forecast_url_trims_trailing_slash() {
        let client = OpenMeteoClient::new(WeatherConfig {
            base_url: "http://localhost:9000/v1/".to_string(),
            timeout_secs: 1,
        })
        .unwrap();
        assert_eq!(client.forecast_url(), "http://localhost:9000/v1/forecast");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            WeatherError::HttpStatus(503).to_string(),
            "API error: HTTP 503"
        );
        assert_eq!(
            WeatherError::InvalidDays(0).to_string(),
            "days must be between 1 and 10"
        );
        assert_eq!(
            WeatherError::Parse("expected value".to_string()).to_string(),
            "Failed to parse JSON response from weather API"
        );
        assert_eq!(
            WeatherError::NoCurrentWeather.to_string(),
            "No current weather data returned"
        );
    }

    #[test]
    fn test_error_conversion_keeps_kind_and_message() {
        let err: ToolError = WeatherError::Network("connection refused".to_string()).into();
        assert_eq!(err.kind, ErrorKind::Network);
        assert_eq!(err.message, "Network error: connection refused");

        let err: ToolError = WeatherError::NoForecast.into();
        assert_eq!(err.kind, ErrorKind::NoData);
    }

    #[test]
    fn test_client_creation() {
        assert!(OpenMeteoClient::with_defaults().is_ok());
    }

    proptest! {
        #[test]
        fn out_of_range_days_never_reach_the_network(days in prop_oneof![Just(0u8), 11u8..=u8::MAX]) {
            // Unroutable base URL: any request would surface as a network error.
            let client = OpenMeteoClient::new(WeatherConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                timeout_secs: 1,
            }).unwrap();

            let result = tokio_test::block_on(client.forecast(52.52, 13.41, days));
            let err = result.unwrap_err();
            prop_assert_eq!(err.kind, ErrorKind::Validation);
            prop_assert_eq!(err.message, "days must be between 1 and 10");
        }
    }
}
