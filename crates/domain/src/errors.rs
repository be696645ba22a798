//! Uniform failure shape
//!
//! Every public client operation returns [`ToolResult`]. Crate-local error
//! enums convert into [`ToolError`] at the crate boundary so callers only ever
//! inspect one type.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request never produced an HTTP response (DNS, connect, timeout)
    Network,
    /// The provider answered with a non-success status code
    HttpStatus,
    /// The response body was not the expected JSON
    JsonParse,
    /// The provider answered successfully but without a usable payload
    NoData,
    /// The caller passed an argument outside the accepted range
    Validation,
    /// Required configuration (e.g. an API credential) is missing
    Configuration,
    /// The generative model reported an error or produced no text
    Inference,
}

impl ErrorKind {
    /// Stable snake_case identifier, identical to the serialized form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::HttpStatus => "http_status",
            Self::JsonParse => "json_parse",
            Self::NoData => "no_data",
            Self::Validation => "validation",
            Self::Configuration => "configuration",
            Self::Inference => "inference",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure returned by every client operation
///
/// Serializes to `{"kind": "...", "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ToolError {
    /// Failure category
    pub kind: ErrorKind,
    /// Human-readable message
    #[serde(rename = "error")]
    pub message: String,
}

impl ToolError {
    /// Create an error of the given kind
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoData, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Whether this failure can never be fixed by retrying the call
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self.kind, ErrorKind::Configuration)
    }
}

/// Success payload or [`ToolError`]
pub type ToolResult<T> = Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_message() {
        let err = ToolError::no_data("City not found");
        assert_eq!(err.to_string(), "City not found");
    }

    #[test]
    fn serializes_to_error_result_shape() {
        let err = ToolError::validation("days must be between 1 and 10");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["error"], "days must be between 1 and 10");
        assert_eq!(json["kind"], "validation");
    }

    #[test]
    fn deserializes_from_error_result_shape() {
        let json = r#"{"kind":"http_status","error":"API error: HTTP 503"}"#;
        let err: ToolError = serde_json::from_str(json).unwrap();
        assert_eq!(err.kind, ErrorKind::HttpStatus);
        assert_eq!(err.message, "API error: HTTP 503");
    }

    #[test]
    fn kind_display_matches_serde_name() {
        for kind in [
            ErrorKind::Network,
            ErrorKind::HttpStatus,
            ErrorKind::JsonParse,
            ErrorKind::NoData,
            ErrorKind::Validation,
            ErrorKind::Configuration,
            ErrorKind::Inference,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }

    #[test]
    fn only_configuration_is_flagged_as_configuration() {
        assert!(ToolError::configuration("GEMINI_API_KEY is not set").is_configuration());
        assert!(!ToolError::network("connection refused").is_configuration());
    }
}
