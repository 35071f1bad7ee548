// ABOUTME: Client for the credential-holding relay endpoint
// ABOUTME: Posts a prompt with generation parameters and returns the completion envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Relay Client
//!
//! Talks to a locally hosted relay endpoint that forwards prompts to the
//! generative-language service with a server-held credential, so the caller
//! never sees the API key. Implements [`CompletionProvider`], which lets the
//! plan pipeline run identically against the relay or directly against
//! Gemini.
//!
//! Single attempt, no retries, no timeout policy beyond the transport
//! default: failures surface immediately to the interactive caller.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::errors::AppError;
use crate::llm::{CompletionProvider, GenerationParams};

/// Relay path for plan generation requests
const GENERATE_PATH: &str = "/api/generate-meal-plan";

/// Relay path for the model listing pass-through
const MODELS_PATH: &str = "/api/models";

/// Request body for the relay's generation endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateBody<'a> {
    prompt: &'a str,
    max_output_tokens: u32,
    temperature: f32,
}

/// Client for the relay endpoint
#[derive(Clone)]
pub struct RelayClient {
    http: Client,
    base_url: String,
}

impl RelayClient {
    /// Create a client for a relay at `base_url` (e.g. `http://localhost:8080`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Decode a relay response, mapping non-success statuses onto the
    /// relay's `{ error, details? }` failure envelope
    async fn decode(
        response: reqwest::Response,
        context: &str,
    ) -> Result<serde_json::Value, AppError> {
        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::internal(format!("Failed to read relay response: {e}")))?;

        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("relay request failed")
                .to_owned();
            return Err(AppError::external_service("relay", message).with_details(
                serde_json::json!({
                    "status": status.as_u16(),
                    "context": context,
                    "body": body,
                }),
            ));
        }

        Ok(body)
    }
}

#[async_trait]
impl CompletionProvider for RelayClient {
    fn name(&self) -> &'static str {
        "relay"
    }

    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<serde_json::Value, AppError> {
        let url = format!("{}{GENERATE_PATH}", self.base_url);
        debug!(%url, "Sending prompt to relay");

        let response = self
            .http
            .post(&url)
            .json(&GenerateBody {
                prompt,
                max_output_tokens: params.max_output_tokens,
                temperature: params.temperature,
            })
            .send()
            .await
            .map_err(|e| AppError::internal(format!("HTTP request failed: {e}")))?;

        Self::decode(response, "generate").await
    }

    #[instrument(skip(self))]
    async fn list_models(&self) -> Result<serde_json::Value, AppError> {
        let url = format!("{}{MODELS_PATH}", self.base_url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("HTTP request failed: {e}")))?;

        Self::decode(response, "models").await
    }
}

impl std::fmt::Debug for RelayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
