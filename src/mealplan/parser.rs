// ABOUTME: Completion text cleanup and JSON parsing into the plan types
// ABOUTME: Strips markdown code fences the model adds despite instructions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Response Parser
//!
//! The prompt instructs the model to answer with bare JSON, but completions
//! still arrive wrapped in markdown code fences often enough that stripping
//! them is part of the contract. Parsing here is purely syntactic; shape
//! checks live on [`MealPlan::validate`] so the two failure modes stay
//! independently observable.

use super::{MealPlan, PlanError};

/// Remove leading/trailing markdown code fences and surrounding whitespace
///
/// Handles ```` ```json ```` and bare ```` ``` ```` markers. Idempotent:
/// already-clean text passes through unchanged.
#[must_use]
pub fn strip_code_fences(text: &str) -> &str {
    let mut cleaned = text.trim();
    if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest.strip_prefix("json").unwrap_or(rest).trim_start();
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest.trim_end();
    }
    cleaned
}

/// Parse completion text into a [`MealPlan`]
///
/// # Errors
///
/// Returns `PlanError::InvalidJson` when the cleaned text is not valid JSON
/// for the plan shape. Truncated completions land here as well.
pub fn parse_meal_plan(text: &str) -> Result<MealPlan, PlanError> {
    serde_json::from_str(strip_code_fences(text)).map_err(PlanError::InvalidJson)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_handles_fence_without_newline() {
        assert_eq!(strip_code_fences("```{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json{\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn test_strip_is_idempotent() {
        let once = strip_code_fences("```json\n{\"days\":[]}\n```");
        assert_eq!(once, "{\"days\":[]}");
        assert_eq!(strip_code_fences(once), once);
    }

    #[test]
    fn test_strip_leaves_clean_text_alone() {
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }
}
