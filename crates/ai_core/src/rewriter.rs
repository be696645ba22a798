//! Friendly rewording of weather details

use domain::{ToolError, ToolResult};
use tracing::{error, instrument};

use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::gemini::GeminiInferenceEngine;
use crate::ports::InferenceEngine;

/// Prefix marking a failed rewrite
pub const LLM_ERROR_MARKER: &str = "[LLM ERROR]";

/// Text returned by [`TextRewriter::rewrite_or_sentinel`] when generation fails
pub const LLM_ERROR_SENTINEL: &str =
    "[LLM ERROR] An issue occurred while processing your request. Please try again later.";

const PROMPT_INSTRUCTIONS: &str = "\
Rewrite the following weather details in a friendly, simple tone.
Do NOT analyze location or provide restricted content.
Do NOT make claims about geography or political regions.
Just restate the weather information clearly.";

/// Whether `text` is a failed rewrite rather than model output
#[must_use]
pub fn is_llm_error(text: &str) -> bool {
    text.starts_with(LLM_ERROR_MARKER)
}

/// Rewrites raw weather details into a short friendly summary
#[derive(Debug)]
pub struct TextRewriter<E = GeminiInferenceEngine> {
    engine: E,
}

impl TextRewriter<GeminiInferenceEngine> {
    /// Build a Gemini-backed rewriter from explicit configuration
    pub fn from_config(config: InferenceConfig) -> ToolResult<Self> {
        Ok(Self::new(GeminiInferenceEngine::new(config)?))
    }

    /// Build a Gemini-backed rewriter with the key from `GEMINI_API_KEY`
    pub fn from_env() -> ToolResult<Self> {
        Self::from_config(InferenceConfig::from_env()?)
    }
}

impl<E: InferenceEngine> TextRewriter<E> {
    pub const fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Render the instruction template around `context`
    #[must_use]
    pub fn build_prompt(context: &str) -> String {
        format!("\n{PROMPT_INSTRUCTIONS}\n\nWEATHER INFO:\n{context}\n")
    }

    /// Reword `context`, reporting failures as [`ToolError`]
    #[instrument(skip(self, context), fields(context_len = context.len()))]
    pub async fn rewrite(&self, context: &str) -> ToolResult<String> {
        let prompt = Self::build_prompt(context);
        let text = self.engine.generate(&prompt).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(ToolError::from(InferenceError::EmptyResponse));
        }
        Ok(text.to_string())
    }

    /// Reword `context`, returning [`LLM_ERROR_SENTINEL`] on any failure
    pub async fn rewrite_or_sentinel(&self, context: &str) -> String {
        match self.rewrite(context).await {
            Ok(text) => text,
            Err(e) => {
                error!(kind = %e.kind, error = %e.message, "Error generating rewritten weather summary");
                LLM_ERROR_SENTINEL.to_string()
            },
        }
    }
}
