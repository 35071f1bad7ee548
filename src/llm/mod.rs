// ABOUTME: Completion provider abstraction for the generative-language service
// ABOUTME: Defines the single seam the relay and the plan pipeline call through
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Completion Provider Interface
//!
//! The contract a completion backend must implement to serve the relay. The
//! provider returns the **raw upstream envelope** rather than a typed
//! response because the relay endpoint is a pass-through: clients receive
//! exactly what the upstream service produced. Typed candidate structs exist
//! only to pull the completion text out of an envelope.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mealplan_server::llm::{CompletionProvider, GeminiProvider, GenerationParams};
//! use mealplan_server::errors::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let provider = GeminiProvider::from_env()?;
//!     let envelope = provider
//!         .generate("Plan one healthy dinner.", &GenerationParams::default())
//!         .await?;
//!     println!("{}", mealplan_server::llm::extract_completion_text(&envelope)?);
//!     Ok(())
//! }
//! ```

mod gemini;

pub use gemini::{GeminiProvider, GEMINI_API_KEY_ENV};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Default sampling temperature for plan generation
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default output length ceiling, in tokens
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4000;

/// Generation parameters for a completion request
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    /// Sampling temperature (0.0 - 2.0)
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

impl GenerationParams {
    /// Set the sampling temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the output length ceiling
    #[must_use]
    pub const fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }
}

/// Completion backend trait
///
/// Implemented by [`GeminiProvider`] for the upstream API and by
/// `relay::RelayClient` for callers that go through the relay endpoint, so
/// the plan pipeline runs unchanged against either.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short provider identifier for logging (e.g. "gemini", "relay")
    fn name(&self) -> &'static str;

    /// Request a completion for a single prompt
    ///
    /// Single attempt, no retries: a failed interactive generation is
    /// surfaced to the user rather than silently re-run.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<serde_json::Value, AppError>;

    /// List the models available upstream
    async fn list_models(&self) -> Result<serde_json::Value, AppError>;
}

// ============================================================================
// Envelope Text Extraction
// ============================================================================

/// Typed slice of the completion envelope, used only for text extraction
#[derive(Debug, Deserialize)]
struct CompletionEnvelope {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    text: Option<String>,
}

/// Pull the generated text out of a completion envelope
///
/// Reads `candidates[0].content.parts[0].text`.
///
/// # Errors
///
/// Returns an invalid-completion error when the envelope has no text
/// candidate.
pub fn extract_completion_text(envelope: &serde_json::Value) -> Result<String, AppError> {
    let envelope: CompletionEnvelope = serde_json::from_value(envelope.clone())
        .map_err(|e| AppError::invalid_completion(format!("malformed completion envelope: {e}")))?;

    envelope
        .candidates
        .and_then(|mut c| (!c.is_empty()).then(|| c.remove(0)))
        .and_then(|c| c.content)
        .and_then(|mut c| (!c.parts.is_empty()).then(|| c.parts.remove(0)))
        .and_then(|p| p.text)
        .ok_or_else(|| AppError::invalid_completion("no text candidate in completion envelope"))
}
