// ABOUTME: Full plan pipeline route from form input to a validated weekly plan
// ABOUTME: Guards against overlapping generations with a request-in-flight flag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Plan Route
//!
//! `POST /api/plan` takes the browser form's fields and runs the whole
//! pipeline server-side, returning the parsed plan together with the calorie
//! profile it was built from.
//!
//! A second submission while one is running is rejected with 409 via the
//! state's in-flight flag; the previous plan held by the client stays intact
//! on any failure because nothing is streamed or partially applied.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::mealplan::{CalorieProfile, MealPlan, PlanGenerator, PlanRequest};
use crate::server::AppState;

/// Response for a successful generation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    /// The validated weekly plan
    pub plan: MealPlan,
    /// Calorie targets the prompt was built from
    pub profile: CalorieProfile,
    /// Generation timestamp, RFC 3339
    pub generated_at: String,
}

/// Plan pipeline routes implementation
pub struct PlanRoutes;

impl PlanRoutes {
    /// Create the plan generation route
    pub fn routes(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/api/plan", post(Self::handle_plan))
            .with_state(state)
    }

    async fn handle_plan(
        State(state): State<Arc<AppState>>,
        Json(request): Json<PlanRequest>,
    ) -> Result<Json<PlanResponse>, AppError> {
        let provider = state.provider()?;
        let _guard = state.begin_generation()?;

        info!(
            family_size = request.family_size,
            dietary = %request.dietary,
            meals = request.meals.len(),
            "Starting plan generation"
        );

        let generated = PlanGenerator::new(provider).generate(&request).await?;

        Ok(Json(PlanResponse {
            plan: generated.plan,
            profile: generated.profile,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }))
    }
}
