// ABOUTME: Models subcommand - prints the upstream model catalog
// ABOUTME: Pass-through of the relay's or Gemini's model listing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use anyhow::Result;

/// Print the upstream model listing as pretty JSON
pub async fn run(relay_url: &str, direct: bool) -> Result<()> {
    let provider = super::provider(relay_url, direct)?;
    let listing = provider.list_models().await?;
    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}
