// ABOUTME: HTTP route modules for the meal plan server
// ABOUTME: Relay, model listing, plan pipeline, exports, health, and the form page
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! HTTP routes
//!
//! Each concern gets its own route struct; `server::router` merges them and
//! applies the middleware stack.

/// Export artifact routes (text and calendar downloads)
pub mod export;

/// The relay endpoint forwarding prompts upstream
pub mod generate;

/// Health check routes for service monitoring
pub mod health;

/// Model listing pass-through
pub mod models;

/// Full plan pipeline route with the request-in-flight guard
pub mod plan;

/// Embedded browser form page
pub mod ui;
