// ABOUTME: Tests for the relay client against a real server instance
// ABOUTME: Full loop: pipeline through the relay over HTTP, plus failure envelope decoding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use common::{sample_completion_text, StubProvider};
use mealplan_server::errors::ErrorCode;
use mealplan_server::llm::{CompletionProvider, GenerationParams};
use mealplan_server::mealplan::{DietaryPreference, MealType, PlanGenerator, PlanRequest};
use mealplan_server::relay::RelayClient;
use mealplan_server::server::{self, AppState};

const ALL_MEALS: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

/// Serve a relay backed by the given state on an ephemeral port
async fn spawn_relay(state: AppState) -> String {
    let app = server::router(Arc::new(state));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_pipeline_runs_through_the_relay() {
    let completion = sample_completion_text(&ALL_MEALS);
    let base = spawn_relay(AppState::with_provider(Arc::new(StubProvider::new(
        completion,
    ))))
    .await;

    let relay = Arc::new(RelayClient::new(base));
    let generator = PlanGenerator::new(relay);

    let request = PlanRequest {
        family_size: 2,
        ages: "30,32".to_owned(),
        dietary: DietaryPreference::None,
        meals: ALL_MEALS.to_vec(),
    };
    let generated = generator.generate(&request).await.unwrap();

    assert_eq!(generated.plan.days.len(), 7);
    assert_eq!(generated.profile.total_daily_calories, 4400);
}

#[tokio::test]
async fn test_relay_failure_envelope_is_decoded() {
    // Relay without a credential answers with the config error envelope
    let base = spawn_relay(AppState::unconfigured()).await;
    let relay = RelayClient::new(base);

    let err = relay
        .generate("prompt", &GenerationParams::default())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert!(err.message.contains("API key not set"));
    assert_eq!(err.details["status"], 500);
}

#[tokio::test]
async fn test_relay_models_pass_through() {
    let base = spawn_relay(AppState::with_provider(Arc::new(StubProvider::new("{}")))).await;
    let relay = RelayClient::new(base);

    let listing = relay.list_models().await.unwrap();
    assert_eq!(listing["models"][0]["name"], "models/gemini-2.0-flash");
}

#[tokio::test]
async fn test_unreachable_relay_is_a_transport_failure() {
    let relay = RelayClient::new("http://127.0.0.1:9");

    let err = relay
        .generate("prompt", &GenerationParams::default())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InternalError);
}
