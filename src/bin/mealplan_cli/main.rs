// ABOUTME: Meal plan CLI - drives the plan pipeline from the terminal
// ABOUTME: Generates plans via the relay or directly against Gemini, writes export artifacts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org
//!
//! Usage:
//! ```bash
//! # Generate a plan through a running relay server
//! mealplan-cli generate --family-size 2 --ages "30, 32" --meals breakfast,lunch,dinner
//!
//! # Generate directly against Gemini (requires GEMINI_API_KEY)
//! mealplan-cli generate --direct --family-size 4 --ages "5, 7, 35, 37" --dietary no-fish
//!
//! # Write the text and calendar artifacts next to the plan
//! mealplan-cli generate --export-dir ./plans
//!
//! # Show the calorie targets for a household
//! mealplan-cli calories --ages "5, 7, 35, 37"
//!
//! # List the models the configured credential can use
//! mealplan-cli models
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mealplan_server::logging;

#[derive(Parser)]
#[command(
    name = "mealplan-cli",
    about = "Meal plan generator CLI",
    long_about = "Drives the meal plan pipeline from the terminal, against a relay server or directly against the Gemini API."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Relay server base URL
    #[arg(long, global = true, default_value = "http://localhost:8080")]
    relay_url: String,

    /// Call the Gemini API directly instead of going through the relay
    #[arg(long, global = true)]
    direct: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a weekly meal plan
    Generate(commands::generate::GenerateArgs),

    /// Print calorie targets for a household
    Calories {
        /// Comma-separated age list
        #[arg(long)]
        ages: String,
    },

    /// List available upstream models
    Models,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init()?;

    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => {
            commands::generate::run(args, &cli.relay_url, cli.direct).await
        }
        Command::Calories { ages } => commands::calories::run(&ages),
        Command::Models => commands::models::run(&cli.relay_url, cli.direct).await,
    }
}
