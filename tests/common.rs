// ABOUTME: Shared helpers for the integration tests
// ABOUTME: Stub completion providers, canned plan payloads, and oneshot request helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

// Each test binary compiles this module independently and uses a subset
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tokio::sync::Notify;
use tower::ServiceExt;

use mealplan_server::errors::AppError;
use mealplan_server::llm::{CompletionProvider, GenerationParams};
use mealplan_server::mealplan::{MealPlan, MealType, DAY_NAMES};
use mealplan_server::server::AppState;

// ============================================================================
// Stub Providers
// ============================================================================

/// Provider returning a fixed completion text wrapped in a Gemini-style
/// envelope, plus an extra metadata field to prove envelope pass-through
pub struct StubProvider {
    pub text: String,
}

impl StubProvider {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn generate(&self, _prompt: &str, _params: &GenerationParams) -> Result<Value, AppError> {
        Ok(envelope_with_text(&self.text))
    }

    async fn list_models(&self) -> Result<Value, AppError> {
        Ok(json!({
            "models": [
                { "name": "models/gemini-2.0-flash" },
                { "name": "models/gemini-1.5-pro" }
            ]
        }))
    }
}

/// Provider that blocks in `generate` until released, for in-flight tests
pub struct GatedProvider {
    pub release: Arc<Notify>,
    pub text: String,
}

#[async_trait]
impl CompletionProvider for GatedProvider {
    fn name(&self) -> &'static str {
        "gated"
    }

    async fn generate(&self, _prompt: &str, _params: &GenerationParams) -> Result<Value, AppError> {
        self.release.notified().await;
        Ok(envelope_with_text(&self.text))
    }

    async fn list_models(&self) -> Result<Value, AppError> {
        Ok(json!({ "models": [] }))
    }
}

/// Wrap completion text in the upstream envelope shape
pub fn envelope_with_text(text: &str) -> Value {
    json!({
        "candidates": [
            {
                "content": { "parts": [ { "text": text } ] },
                "finishReason": "STOP"
            }
        ],
        "usageMetadata": { "totalTokenCount": 123 }
    })
}

// ============================================================================
// Canned Plan Payloads
// ============================================================================

/// A syntactically valid 7-day completion for the given meal selection
pub fn sample_completion_text(meals: &[MealType]) -> String {
    let days: Vec<Value> = DAY_NAMES
        .iter()
        .map(|day| {
            let mut meal_map = serde_json::Map::new();
            for meal in meals {
                meal_map.insert(
                    meal.as_str().to_owned(),
                    json!({
                        "name": format!("{day} {} Bowl", meal.as_str()),
                        "description": "A quick, balanced dish.",
                        "prepTime": 20,
                        "calories": 500,
                        "recipeUrl": "https://example.com/recipe",
                        "ingredients": ["rice", "vegetables", "olive oil"]
                    }),
                );
            }
            json!({ "day": day, "meals": meal_map })
        })
        .collect();

    json!({
        "days": days,
        "groceryList": {
            "Proteins": ["2 lbs chicken breast"],
            "Vegetables": ["3 large tomatoes"],
            "Pantry": ["1 bottle olive oil"]
        }
    })
    .to_string()
}

/// The canned completion parsed into a plan
pub fn sample_plan(meals: &[MealType]) -> MealPlan {
    serde_json::from_str(&sample_completion_text(meals)).expect("canned plan must parse")
}

/// Router backed by a stub provider returning `text`
pub fn router_with_completion(text: impl Into<String>) -> Router {
    let state = Arc::new(AppState::with_provider(Arc::new(StubProvider::new(text))));
    mealplan_server::server::router(state)
}

// ============================================================================
// Oneshot Request Helpers
// ============================================================================

/// Execute one request against a router and return the full response
pub async fn send_full(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<&Value>,
) -> axum::http::Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    let request = builder
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .expect("failed to build request");

    app.oneshot(request).await.expect("failed to execute request")
}

/// Execute one request against a router and return status plus raw body
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<&Value>,
) -> (StatusCode, Vec<u8>) {
    let response = send_full(app, method, uri, body).await;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body")
        .to_vec();
    (status, bytes)
}

/// Execute one request and decode the JSON response body
pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<&Value>,
) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}
