//! Google Gemini inference engine
//!
//! Talks to the Generative Language API `generateContent` endpoint.

mod client;

pub use client::GeminiInferenceEngine;
