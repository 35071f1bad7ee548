// ABOUTME: Calories subcommand - prints the household calorie targets
// ABOUTME: Runs the estimator without touching the network
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use anyhow::Result;
use mealplan_server::mealplan::calories;

/// Print the per-age breakdown and aggregate targets for an age list
pub fn run(ages: &str) -> Result<()> {
    let profile = calories::estimate(ages)?;

    println!("CALORIE TARGETS");
    println!("===============");
    for entry in &profile.entries {
        println!("age {:>3}: {} calories/day", entry.age, entry.daily_calories);
    }
    println!();
    println!(
        "Total family daily needs: {} calories",
        profile.total_daily_calories
    );
    println!(
        "Average per person: {} calories/day",
        profile.average_per_person
    );
    Ok(())
}
