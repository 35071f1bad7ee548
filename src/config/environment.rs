// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses ports, API credentials, and overrides from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Environment-based configuration management
//!
//! The server starts without a Gemini API key: the relay surfaces a
//! server-configuration error at request time instead, keeping the failure
//! distinct from upstream API errors.

use std::env;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default HTTP port
const DEFAULT_HTTP_PORT: u16 = 8080;

/// Server configuration loaded from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port (`HTTP_PORT`, default 8080)
    pub http_port: u16,
    /// Gemini API key (`GEMINI_API_KEY`); optional at startup
    pub gemini_api_key: Option<String>,
    /// Model override (`GEMINI_MODEL`)
    pub gemini_model: Option<String>,
    /// API base URL override (`GEMINI_BASE_URL`), used by tests and proxies
    pub gemini_base_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when `HTTP_PORT` is set but not a valid port number.
    pub fn from_env() -> Result<Self> {
        let http_port = match env::var("HTTP_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("HTTP_PORT is not a valid port number: {raw}"))?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        let gemini_api_key = env::var(crate::llm::GEMINI_API_KEY_ENV).ok();
        if gemini_api_key.is_none() {
            warn!(
                "{} is not set; generation requests will fail with a \
                 server-configuration error",
                crate::llm::GEMINI_API_KEY_ENV
            );
        }

        Ok(Self {
            http_port,
            gemini_api_key,
            gemini_model: env::var("GEMINI_MODEL").ok(),
            gemini_base_url: env::var("GEMINI_BASE_URL").ok(),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            gemini_api_key: None,
            gemini_model: None,
            gemini_base_url: None,
        }
    }
}
