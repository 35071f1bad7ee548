// ABOUTME: Plan generation pipeline from form input to a validated weekly plan
// ABOUTME: Orchestrates estimator, prompt builder, completion call, parser, validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Plan Generator
//!
//! The one configurable pipeline behind every generation entry point (HTTP
//! route and CLI): validate the request, estimate calories, build the
//! prompt, call the completion provider, extract and parse the completion,
//! and validate the plan against the requested meal selection.
//!
//! The generator holds no mutable state; callers that need to reject
//! overlapping submissions do so at their own boundary (the HTTP layer uses
//! a request-in-flight flag).

use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::{calories, parser, prompt, CalorieProfile, MealPlan, PlanRequest};
use crate::errors::AppError;
use crate::llm::{self, CompletionProvider, GenerationParams};

/// Result of one successful generation
#[derive(Debug, Clone)]
pub struct GeneratedPlan {
    /// The parsed, validated weekly plan
    pub plan: MealPlan,
    /// Calorie profile the prompt was built from
    pub profile: CalorieProfile,
    /// The exact prompt sent upstream
    pub prompt: String,
}

/// Plan generation pipeline over a completion provider
pub struct PlanGenerator {
    provider: Arc<dyn CompletionProvider>,
    params: GenerationParams,
}

impl PlanGenerator {
    /// Create a generator with default generation parameters
    #[must_use]
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            params: GenerationParams::default(),
        }
    }

    /// Override the generation parameters
    #[must_use]
    pub const fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Run the full pipeline for one request
    ///
    /// # Errors
    ///
    /// Input problems surface as invalid-input errors, provider failures
    /// keep their upstream classification, and unparseable or mismatched
    /// completions surface as invalid-completion errors. Nothing is retried.
    #[instrument(skip(self, request), fields(provider = self.provider.name(), meals = request.meals.len()))]
    pub async fn generate(&self, request: &PlanRequest) -> Result<GeneratedPlan, AppError> {
        request.validate()?;
        let profile = calories::estimate(&request.ages)?;
        debug!(
            total = profile.total_daily_calories,
            average = profile.average_per_person,
            "Estimated calorie targets"
        );

        let prompt = prompt::build_prompt(request, &profile);
        let envelope = self.provider.generate(&prompt, &self.params).await?;
        let text = llm::extract_completion_text(&envelope)?;

        let plan = parser::parse_meal_plan(&text)?;
        plan.validate(&request.meals)?;

        info!(days = plan.days.len(), "Generated meal plan");
        Ok(GeneratedPlan {
            plan,
            profile,
            prompt,
        })
    }
}

impl std::fmt::Debug for PlanGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanGenerator")
            .field("provider", &self.provider.name())
            .field("params", &self.params)
            .finish()
    }
}
