// ABOUTME: HTTP server assembly, shared application state, and the middleware stack
// ABOUTME: Owns the completion provider handle and the request-in-flight flag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Server Assembly
//!
//! Builds the router from the per-concern route modules and runs it. The
//! shared [`AppState`] holds the completion provider (absent when the
//! credential is unconfigured, so the relay can report a distinct
//! server-configuration error) and the in-flight flag that disables
//! concurrent plan submissions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::errors::AppError;
use crate::llm::{CompletionProvider, GeminiProvider};
use crate::routes::export::ExportRoutes;
use crate::routes::generate::GenerateRoutes;
use crate::routes::health::HealthRoutes;
use crate::routes::models::ModelRoutes;
use crate::routes::plan::PlanRoutes;
use crate::routes::ui::UiRoutes;

/// Upstream generation can take a while; give requests a generous ceiling
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Shared application state
pub struct AppState {
    provider: Option<Arc<dyn CompletionProvider>>,
    plan_in_flight: AtomicBool,
}

impl AppState {
    /// Build state from configuration, constructing the Gemini provider
    /// when a credential is present
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        let provider = config.gemini_api_key.as_ref().map(|key| {
            let mut provider = GeminiProvider::new(key);
            if let Some(model) = &config.gemini_model {
                provider = provider.with_model(model);
            }
            if let Some(base_url) = &config.gemini_base_url {
                provider = provider.with_base_url(base_url);
            }
            Arc::new(provider) as Arc<dyn CompletionProvider>
        });
        Self {
            provider,
            plan_in_flight: AtomicBool::new(false),
        }
    }

    /// Build state around an existing provider (tests, CLI)
    #[must_use]
    pub fn with_provider(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider: Some(provider),
            plan_in_flight: AtomicBool::new(false),
        }
    }

    /// Build state with no provider configured
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            provider: None,
            plan_in_flight: AtomicBool::new(false),
        }
    }

    /// The configured completion provider
    ///
    /// # Errors
    ///
    /// Returns a config-missing error when no credential was configured,
    /// matching the relay's server-configuration failure contract.
    pub fn provider(&self) -> Result<Arc<dyn CompletionProvider>, AppError> {
        self.provider
            .clone()
            .ok_or_else(|| AppError::config_missing("Server configuration error: API key not set"))
    }

    /// Claim the in-flight flag for a plan generation
    ///
    /// # Errors
    ///
    /// Returns a request-in-flight error when another generation holds the
    /// flag. The returned guard releases it on drop.
    pub fn begin_generation(&self) -> Result<GenerationGuard<'_>, AppError> {
        self.plan_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AppError::request_in_flight())?;
        Ok(GenerationGuard {
            flag: &self.plan_in_flight,
        })
    }
}

/// RAII guard for the request-in-flight flag
pub struct GenerationGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for GenerationGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Assemble the full router with the middleware stack
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(UiRoutes::routes())
        .merge(HealthRoutes::routes())
        .merge(GenerateRoutes::routes(state.clone()))
        .merge(ModelRoutes::routes(state.clone()))
        .merge(PlanRoutes::routes(state))
        .merge(ExportRoutes::routes())
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(std::time::Duration::from_secs(
                    REQUEST_TIMEOUT_SECS,
                )))
                .layer(CorsLayer::permissive()),
        )
}

/// Bind and run the server until shutdown
///
/// # Errors
///
/// Returns an error when the listen address cannot be bound.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let state = Arc::new(AppState::from_config(&config));
    let app = router(state);

    let listener = TcpListener::bind(("0.0.0.0", config.http_port))
        .await
        .with_context(|| format!("failed to bind port {}", config.http_port))?;

    info!(port = config.http_port, "Meal plan server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
