// ABOUTME: Main library entry point for the meal plan server
// ABOUTME: Exposes the plan pipeline, the Gemini relay, and the HTTP surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Meal Plan Server
//!
//! A small web service that turns household meal-planning preferences into a
//! structured 7-day plan by prompting Google's generative-language API
//! (Gemini) through a credential-holding relay endpoint.
//!
//! ## Features
//!
//! - **Calorie estimation**: deterministic per-age daily targets
//! - **Prompt construction**: preference directives and a dynamic JSON schema
//! - **Relay endpoint**: server-held API key, pass-through completion envelope
//! - **Plan parsing**: code-fence cleanup plus explicit schema validation
//! - **Exports**: plain-text and iCalendar artifacts with stable filenames
//!
//! ## Quick Start
//!
//! 1. Set `GEMINI_API_KEY` in the environment
//! 2. Start the server with `mealplan-server`
//! 3. Open the form page or drive the pipeline with `mealplan-cli`
//!
//! ## Architecture
//!
//! The pipeline stages are plain functions layered leaf-first: the calorie
//! estimator feeds the prompt builder, the completion provider returns the
//! raw upstream envelope, and the parser/validators produce the in-memory
//! plan consumed by the export serializers. The HTTP layer is a thin
//! consumer of the same pipeline.

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by the binary crates (src/bin/) and the
// integration tests (tests/).

/// Environment-based configuration management
pub mod config;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Completion provider abstraction and the Gemini implementation
pub mod llm;

/// Production logging and structured output
pub mod logging;

/// Meal plan domain: estimator, prompt builder, parser, exports, pipeline
pub mod mealplan;

/// Client for the credential-holding relay endpoint
pub mod relay;

/// `HTTP` routes for the relay, the plan pipeline, and exports
pub mod routes;

/// HTTP server assembly and shared application state
pub mod server;
