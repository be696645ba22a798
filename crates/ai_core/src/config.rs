//! Configuration for the inference engine

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Configuration for the inference engine
#[derive(Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the Generative Language API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Sampling temperature; provider default when unset
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Upper bound on generated tokens; provider default when unset
    #[serde(default)]
    pub max_output_tokens: Option<u32>,

    /// API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash-lite".to_string()
}

const fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_ms: default_timeout_ms(),
            temperature: None,
            max_output_tokens: None,
            api_key: None,
        }
    }
}

impl std::fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_ms", &self.timeout_ms)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .finish()
    }
}

impl InferenceConfig {
    /// Default settings with the key taken from `GEMINI_API_KEY`
    pub fn from_env() -> Result<Self, InferenceError> {
        Self::default().with_api_key_from(|name| std::env::var(name).ok())
    }

    /// Fill in the API key using `lookup` (called with [`API_KEY_ENV`])
    ///
    /// Blank values count as missing.
    pub fn with_api_key_from<F>(mut self, lookup: F) -> Result<Self, InferenceError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let key = lookup(API_KEY_ENV)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(InferenceError::MissingApiKey)?;
        self.api_key = Some(SecretString::from(key));
        Ok(self)
    }

    /// The configured key, or [`InferenceError::MissingApiKey`]
    pub fn api_key(&self) -> Result<&SecretString, InferenceError> {
        self.api_key
            .as_ref()
            .filter(|k| !k.expose_secret().is_empty())
            .ok_or(InferenceError::MissingApiKey)
    }
}
