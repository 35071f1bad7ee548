// ABOUTME: Relay route forwarding prompts to the generative-language service
// ABOUTME: Validates the request, injects the server-held credential, passes the envelope through
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Relay Endpoint
//!
//! `POST /api/generate-meal-plan` accepts `{ prompt, maxOutputTokens?,
//! temperature? }` and returns the upstream completion envelope verbatim.
//! The API credential never leaves the server.
//!
//! Failure ordering mirrors the relay contract: a missing credential is a
//! server-configuration error (500) surfaced before request validation, a
//! missing or blank prompt is a bad request (400), and upstream failures
//! carry the upstream status and body in the `details` payload. Non-POST
//! methods receive 405 from the router. No retries, no timeout policy:
//! one attempt per user action.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::llm::{GenerationParams, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE};
use crate::server::AppState;

/// Request body for the relay endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMealPlanRequest {
    /// The fully rendered prompt; required and non-blank
    #[serde(default)]
    pub prompt: Option<String>,
    /// Output length ceiling, defaults to 4000
    #[serde(default)]
    pub max_output_tokens: Option<u32>,
    /// Sampling temperature, defaults to 0.7
    #[serde(default)]
    pub temperature: Option<f32>,
}

/// Relay routes implementation
pub struct GenerateRoutes;

impl GenerateRoutes {
    /// Create the relay route
    pub fn routes(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/api/generate-meal-plan", post(Self::handle_generate))
            .with_state(state)
    }

    async fn handle_generate(
        State(state): State<Arc<AppState>>,
        Json(request): Json<GenerateMealPlanRequest>,
    ) -> Result<Json<serde_json::Value>, AppError> {
        // Credential check comes first so a misconfigured server is
        // distinguishable from a bad request
        let provider = state.provider()?;

        let prompt = request
            .prompt
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| AppError::missing_field("prompt"))?;

        let params = GenerationParams {
            temperature: request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_output_tokens: request
                .max_output_tokens
                .unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS),
        };

        info!(prompt_len = prompt.len(), "Relaying generation request");
        let envelope = provider.generate(&prompt, &params).await?;
        Ok(Json(envelope))
    }
}
