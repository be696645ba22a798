//! Inference errors

use domain::{ErrorKind, ToolError};
use thiserror::Error;

/// Errors that can occur during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    /// No API key was configured
    #[error("GEMINI_API_KEY not found in environment. Please ensure it's set.")]
    MissingApiKey,

    /// The HTTP client could not be built
    #[error("Failed to initialize HTTP client: {0}")]
    ClientInit(String),

    /// Failed to connect to the inference server
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the inference server failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Timeout during inference
    #[error("Inference timeout after {0}ms")]
    Timeout(u64),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The server answered with a non-success status
    #[error("Server error: HTTP {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Response parsing failed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The prompt was rejected by the provider's safety filters
    #[error("Prompt blocked: {0}")]
    Blocked(String),

    /// The model produced no text
    #[error("Model returned an empty response")]
    EmptyResponse,
}

impl InferenceError {
    /// Build from a transport error, recording the configured timeout
    pub(crate) fn from_transport(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }

    /// Failure category in the shared taxonomy
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingApiKey | Self::ClientInit(_) => ErrorKind::Configuration,
            Self::ConnectionFailed(_) | Self::RequestFailed(_) | Self::Timeout(_) => {
                ErrorKind::Network
            },
            Self::RateLimited | Self::ServerError { .. } => ErrorKind::HttpStatus,
            Self::InvalidResponse(_) => ErrorKind::JsonParse,
            Self::Blocked(_) | Self::EmptyResponse => ErrorKind::Inference,
        }
    }
}

impl From<InferenceError> for ToolError {
    fn from(err: InferenceError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}
