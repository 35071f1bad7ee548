// ABOUTME: Google Gemini completion provider over the generative-language REST API
// ABOUTME: Holds the server-side API key and performs single-attempt generateContent calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Gemini Provider
//!
//! Implementation of [`CompletionProvider`] for Google's Gemini models.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with your API key from
//! Google AI Studio: <https://aistudio.google.com/app/apikey>
//!
//! The base URL can be overridden with [`GeminiProvider::with_base_url`],
//! which the tests use to point the provider at a local stub server.

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{CompletionProvider, GenerationParams};
use crate::errors::{AppError, ErrorCode};

/// Environment variable for the Gemini API key
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default model to use
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Available Gemini models on the v1 endpoint
const AVAILABLE_MODELS: &[&str] = &["gemini-2.0-flash", "gemini-1.5-flash", "gemini-1.5-pro"];

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1";

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: GenerationConfig,
}

/// Content block for the Gemini API
#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<ContentPart<'a>>,
}

/// Text part of a content block
#[derive(Debug, Serialize)]
struct ContentPart<'a> {
    text: &'a str,
}

/// Generation configuration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

/// Error body returned by the Gemini API
#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini completion provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            base_url: API_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
        }
    }

    /// Create a provider from the `GEMINI_API_KEY` environment variable
    ///
    /// # Errors
    ///
    /// Returns a config-missing error when the variable is not set, so the
    /// relay can surface the server-configuration failure distinctly from an
    /// upstream one.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = env::var(GEMINI_API_KEY_ENV).map_err(|_| {
            AppError::config_missing(format!("{GEMINI_API_KEY_ENV} environment variable not set"))
        })?;
        Ok(Self::new(api_key))
    }

    /// Set a custom model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom API base URL (tests, regional endpoints)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The model requests are sent to
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Models known to work against the v1 endpoint
    #[must_use]
    pub const fn available_models() -> &'static [&'static str] {
        AVAILABLE_MODELS
    }

    /// Build the API URL for a model and method
    fn build_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{method}?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    /// Map a non-success upstream status onto the error taxonomy
    ///
    /// The upstream status and body travel in `details` so the relay's
    /// failure envelope keeps its diagnostic payload.
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let body: serde_json::Value =
            serde_json::from_str(response_text).unwrap_or(serde_json::Value::Null);
        let message = serde_json::from_str::<GeminiErrorBody>(response_text)
            .ok()
            .and_then(|b| b.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        let code = match status {
            429 => ErrorCode::ExternalRateLimited,
            _ => ErrorCode::ExternalServiceError,
        };

        AppError::new(code, format!("Gemini API error ({status}): {message}")).with_details(
            serde_json::json!({
                "status": status,
                "body": body,
            }),
        )
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<serde_json::Value, AppError> {
        let url = self.build_url("generateContent");

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![ContentPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: params.temperature,
                max_output_tokens: params.max_output_tokens,
            },
        };

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| AppError::internal(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let envelope: serde_json::Value = serde_json::from_str(&response_text).map_err(|e| {
            error!(error = %e, "Failed to parse Gemini response");
            AppError::external_service("gemini", format!("unparseable response body: {e}"))
        })?;

        debug!("Successfully received Gemini response");
        Ok(envelope)
    }

    #[instrument(skip(self))]
    async fn list_models(&self) -> Result<serde_json::Value, AppError> {
        let url = format!("{}/models?key={}", self.base_url, self.api_key);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| AppError::internal(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            error!(status = %status, "Gemini model listing failed");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        serde_json::from_str(&response_text).map_err(|e| {
            AppError::external_service("gemini", format!("unparseable model listing: {e}"))
        })
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            // Omit `client` field as HTTP clients are not useful to debug
            .finish_non_exhaustive()
    }
}
