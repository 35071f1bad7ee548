// ABOUTME: Embedded browser form page
// ABOUTME: Serves the static single-page UI that drives the plan pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Form Page
//!
//! `GET /` serves the embedded single-page form. The page is compiled into
//! the binary so the server ships as one artifact with no asset directory.

use axum::response::Html;
use axum::routing::get;
use axum::Router;

/// Form page routes implementation
pub struct UiRoutes;

impl UiRoutes {
    /// Create the form page route
    pub fn routes() -> Router {
        Router::new().route("/", get(Self::handle_index))
    }

    async fn handle_index() -> Html<&'static str> {
        Html(include_str!("../../static/index.html"))
    }
}
