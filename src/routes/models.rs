// ABOUTME: Model listing pass-through route
// ABOUTME: Forwards the upstream model catalog without exposing the credential
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Model Listing
//!
//! `GET /api/models` returns the upstream model catalog verbatim. Useful for
//! verifying the configured credential and picking a model override.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::errors::AppError;
use crate::server::AppState;

/// Model listing routes implementation
pub struct ModelRoutes;

impl ModelRoutes {
    /// Create the model listing route
    pub fn routes(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/api/models", get(Self::handle_list_models))
            .with_state(state)
    }

    async fn handle_list_models(
        State(state): State<Arc<AppState>>,
    ) -> Result<Json<serde_json::Value>, AppError> {
        let provider = state.provider()?;
        let listing = provider.list_models().await?;
        Ok(Json(listing))
    }
}
