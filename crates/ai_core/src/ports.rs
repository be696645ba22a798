//! Port definitions for inference engines

use async_trait::async_trait;

use crate::error::InferenceError;

/// Port for text generation backends
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    /// Generate a completion for a single prompt
    async fn generate(&self, prompt: &str) -> Result<String, InferenceError>;
}
