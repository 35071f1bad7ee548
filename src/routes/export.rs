// ABOUTME: Export artifact routes producing downloadable text and calendar files
// ABOUTME: Stateless transforms of a posted plan, with attachment filenames per date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Export Routes
//!
//! `POST /api/plan/export/text` and `POST /api/plan/export/calendar` accept a
//! previously generated plan (the text variant optionally with its calorie
//! profile) and respond with the artifact body, the matching MIME type, and
//! a `Content-Disposition` attachment filename of the form
//! `meal-plan-<ISO-date>.txt` / `.ics`.

use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use chrono::Local;
use serde::Deserialize;

use crate::mealplan::export;
use crate::mealplan::{CalorieProfile, MealPlan};

/// Request body for the export endpoints
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// The plan to serialize
    pub plan: MealPlan,
    /// Calorie profile for the text header block, when available
    #[serde(default)]
    pub profile: Option<CalorieProfile>,
}

/// Export routes implementation
pub struct ExportRoutes;

impl ExportRoutes {
    /// Create the export routes
    pub fn routes() -> Router {
        Router::new()
            .route("/api/plan/export/text", post(Self::handle_text))
            .route("/api/plan/export/calendar", post(Self::handle_calendar))
    }

    async fn handle_text(Json(request): Json<ExportRequest>) -> Response {
        let today = Local::now().date_naive();
        let body = export::text_document(&request.plan, request.profile.as_ref(), today);
        attachment(body, "text/plain; charset=utf-8", &export::text_filename(today))
    }

    async fn handle_calendar(Json(request): Json<ExportRequest>) -> Response {
        let today = Local::now().date_naive();
        let body = export::calendar_document(&request.plan, today);
        attachment(body, "text/calendar", &export::calendar_filename(today))
    }
}

/// Build a download response with the given MIME type and filename
fn attachment(body: String, content_type: &'static str, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}
