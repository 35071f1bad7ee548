// ABOUTME: Server binary for the meal plan relay and pipeline
// ABOUTME: Loads environment configuration, initializes logging, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Meal Plan Server Binary
//!
//! Starts the HTTP server with the relay endpoint, the plan pipeline, and
//! the embedded form page. Configuration is environment-only; see
//! `config::environment`.

use anyhow::Result;
use clap::Parser;
use mealplan_server::{config::ServerConfig, logging, server};
use tracing::info;

#[derive(Parser)]
#[command(name = "mealplan-server")]
#[command(about = "Meal plan generator - Gemini relay and plan pipeline")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init()?;

    let args = Args::parse();
    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.http_port {
        config.http_port = port;
    }

    info!(
        port = config.http_port,
        credential_configured = config.gemini_api_key.is_some(),
        "Starting meal plan server"
    );

    server::serve(config).await
}
