//! AI Core - hosted text generation
//!
//! Provides the [`InferenceEngine`] port, a Google Gemini implementation, and
//! the [`TextRewriter`] that turns raw weather details into friendly prose.

pub mod config;
pub mod error;
pub mod gemini;
pub mod ports;
pub mod rewriter;

pub use config::{API_KEY_ENV, InferenceConfig};
pub use error::InferenceError;
pub use gemini::GeminiInferenceEngine;
pub use ports::InferenceEngine;
pub use rewriter::{LLM_ERROR_MARKER, LLM_ERROR_SENTINEL, TextRewriter, is_llm_error};
