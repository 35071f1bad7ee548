// ABOUTME: CLI subcommand implementations
// ABOUTME: One module per subcommand
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

pub mod calories;
pub mod generate;
pub mod models;

use std::sync::Arc;

use mealplan_server::llm::{CompletionProvider, GeminiProvider};
use mealplan_server::relay::RelayClient;

/// Pick the completion backend: the relay by default, Gemini when `--direct`
pub fn provider(relay_url: &str, direct: bool) -> anyhow::Result<Arc<dyn CompletionProvider>> {
    if direct {
        Ok(Arc::new(GeminiProvider::from_env()?))
    } else {
        Ok(Arc::new(RelayClient::new(relay_url)))
    }
}
