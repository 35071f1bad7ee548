// ABOUTME: Generate subcommand - runs the full plan pipeline from the terminal
// ABOUTME: Prints the text rendering and optionally writes both export artifacts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use mealplan_server::mealplan::{
    export, DietaryPreference, MealType, PlanGenerator, PlanRequest,
};
use tracing::info;

#[derive(Args)]
pub struct GenerateArgs {
    /// Number of people in the household
    #[arg(long, default_value_t = 2)]
    family_size: u32,

    /// Comma-separated age list
    #[arg(long, default_value = "30, 32")]
    ages: String,

    /// Dietary preference (none, vegetarian, no-fish, simple-cooking, ...)
    #[arg(long, default_value = "none")]
    dietary: DietaryPreference,

    /// Comma-separated meal slots to include
    #[arg(long, default_value = "breakfast,lunch,dinner", value_delimiter = ',')]
    meals: Vec<MealType>,

    /// Directory to write the text and calendar artifacts into
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

/// Run the pipeline and print the plan as its text rendering
pub async fn run(args: GenerateArgs, relay_url: &str, direct: bool) -> Result<()> {
    let provider = super::provider(relay_url, direct)?;
    let request = PlanRequest {
        family_size: args.family_size,
        ages: args.ages,
        dietary: args.dietary,
        meals: args.meals,
    };

    let generated = PlanGenerator::new(provider).generate(&request).await?;
    let today = Local::now().date_naive();

    let text = export::text_document(&generated.plan, Some(&generated.profile), today);
    println!("{text}");

    if let Some(dir) = args.export_dir {
        let (text_path, calendar_path) =
            export::write_artifacts(&dir, &generated.plan, Some(&generated.profile), today)
                .with_context(|| format!("failed to write artifacts into {}", dir.display()))?;

        info!(
            text = %text_path.display(),
            calendar = %calendar_path.display(),
            "Wrote export artifacts"
        );
    }

    Ok(())
}
