//! Application configuration

use std::path::Path;

use ai_core::{GeminiInferenceEngine, InferenceConfig, TextRewriter};
use domain::ToolResult;
use integration_geocoding::{GeocodingConfig, OpenMeteoGeocoder};
use integration_weather::{OpenMeteoClient, WeatherConfig};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prefix for environment overrides, e.g. `SKYBRIEF_WEATHER__TIMEOUT_SECS`
pub const ENV_PREFIX: &str = "SKYBRIEF";

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "skybrief";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Geocoding service configuration
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Weather service configuration
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Inference configuration
    ///
    /// The API key normally comes from `GEMINI_API_KEY`, see
    /// [`AppConfig::inference_config`].
    #[serde(default)]
    pub inference: InferenceConfig,
}

impl AppConfig {
    /// Load configuration from `skybrief.toml` (if present) and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of the default file
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::build(path, None)
    }

    fn build(
        path: Option<&Path>,
        env_source: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("geocoding.base_url", GeocodingConfig::default().base_url)?
            .set_default("weather.base_url", WeatherConfig::default().base_url)?
            .set_default("inference.base_url", InferenceConfig::default().base_url)?
            .set_default("inference.model", InferenceConfig::default().model)?
            .add_source(file)
            // Override with environment variables (e.g., SKYBRIEF_INFERENCE__MODEL)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env_source),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(
            geocoding = %config.geocoding.base_url,
            weather = %config.weather.base_url,
            model = %config.inference.model,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Inference settings completed with the key from `GEMINI_API_KEY`
    ///
    /// A key already present in the loaded configuration wins. A missing key
    /// is returned as a configuration error.
    pub fn inference_config(&self) -> ToolResult<InferenceConfig> {
        self.inference_config_with(|name| std::env::var(name).ok())
    }

    fn inference_config_with<F>(&self, lookup: F) -> ToolResult<InferenceConfig>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let configured = self
            .inference
            .api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty());

        if configured {
            Ok(self.inference.clone())
        } else {
            Ok(self.inference.clone().with_api_key_from(lookup)?)
        }
    }

    /// Geocoder for the configured endpoint
    pub fn geocoder(&self) -> ToolResult<OpenMeteoGeocoder> {
        Ok(OpenMeteoGeocoder::new(self.geocoding.clone())?)
    }

    /// Weather client for the configured endpoint
    pub fn weather_client(&self) -> ToolResult<OpenMeteoClient> {
        Ok(OpenMeteoClient::new(self.weather.clone())?)
    }

    /// Gemini-backed rewriter; fails without an API key
    pub fn rewriter(&self) -> ToolResult<TextRewriter<GeminiInferenceEngine>> {
        TextRewriter::from_config(self.inference_config()?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use domain::ErrorKind;
    use secrecy::SecretString;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_sources() {
        let config = AppConfig::build(None, env(&[])).unwrap();
        assert_eq!(config.geocoding.base_url, "https://geocoding-api.open-meteo.com/v1");
        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.weather.timeout_secs, 10);
        assert_eq!(config.inference.model, "gemini-2.5-flash-lite");
        assert_eq!(config.inference.timeout_ms, 30_000);
        assert!(config.inference.api_key.is_none());
    }

    #[test]
    fn file_overrides_defaults() {
        let file = toml_file(
            r#"
[weather]
base_url = "http://localhost:8080/v1"
timeout_secs = 3

[inference]
model = "gemini-2.5-flash"
"#,
        );

        let config = AppConfig::build(Some(file.path()), env(&[])).unwrap();
        assert_eq!(config.weather.base_url, "http://localhost:8080/v1");
        assert_eq!(config.weather.timeout_secs, 3);
        assert_eq!(config.inference.model, "gemini-2.5-flash");
        assert_eq!(
            config.geocoding.base_url,
            "https://geocoding-api.open-meteo.com/v1"
        );
    }

    #[test]
    fn environment_overrides_file() {
        let file = toml_file("[weather]\ntimeout_secs = 3\n");

        let config = AppConfig::build(
            Some(file.path()),
            env(&[
                ("SKYBRIEF_WEATHER__TIMEOUT_SECS", "7"),
                ("SKYBRIEF_INFERENCE__MODEL", "gemini-2.0-flash"),
            ]),
        )
        .unwrap();
        assert_eq!(config.weather.timeout_secs, 7);
        assert_eq!(config.inference.model, "gemini-2.0-flash");
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let result = AppConfig::build(Some(Path::new("/nonexistent/skybrief.toml")), env(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn inference_config_reads_key() {
        let config = AppConfig::default();
        let inference = config
            .inference_config_with(|name| {
                assert_eq!(name, "GEMINI_API_KEY");
                Some("env-key".to_string())
            })
            .unwrap();
        assert_eq!(inference.api_key().unwrap().expose_secret(), "env-key");
    }

    #[test]
    fn inference_config_prefers_configured_key() {
        let mut config = AppConfig::default();
        config.inference.api_key = Some(SecretString::from("file-key"));

        let inference = config
            .inference_config_with(|_| Some("env-key".to_string()))
            .unwrap();
        assert_eq!(inference.api_key().unwrap().expose_secret(), "file-key");
    }

    #[test]
    fn inference_config_without_key_is_configuration_error() {
        let err = AppConfig::default()
            .inference_config_with(|_| None)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
        assert!(err.is_configuration());
    }

    #[test]
    fn adapters_build_from_defaults() {
        let config = AppConfig::default();
        assert!(config.geocoder().is_ok());
        assert!(config.weather_client().is_ok());
    }
}
