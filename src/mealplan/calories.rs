// ABOUTME: Deterministic calorie estimation from a comma-separated age list
// ABOUTME: Fixed age-bracket table, aggregate totals, rounded per-person average
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Calorie Estimator
//!
//! Maps household ages onto daily calorie targets using a fixed bracket
//! table (lower bound inclusive, upper bound exclusive):
//!
//! | age    | daily calories |
//! |--------|----------------|
//! | < 4    | 1200           |
//! | < 9    | 1600           |
//! | < 14   | 2000           |
//! | < 19   | 2400           |
//! | < 51   | 2200           |
//! | else   | 1800           |
//!
//! Entries that fail to parse are discarded; an input with zero parseable
//! ages is an error, never a division by zero.

use serde::{Deserialize, Serialize};

use super::PlanError;

/// Daily calorie target for a single age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieEntry {
    pub age: u32,
    pub daily_calories: u32,
}

/// Aggregate calorie targets for a household
///
/// Derived and immutable; recomputed for every generation, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieProfile {
    /// Per-age targets in input order, duplicates preserved
    pub entries: Vec<CalorieEntry>,
    /// Sum of all per-age targets
    pub total_daily_calories: u32,
    /// `round(total / count)` over the parseable ages
    pub average_per_person: u32,
}

impl CalorieProfile {
    /// Family-wide calorie target for a single meal slot
    #[must_use]
    pub fn per_meal_target(&self, meals_per_day: usize) -> u32 {
        if meals_per_day == 0 {
            return 0;
        }
        round_div(self.total_daily_calories, meals_per_day as u32)
    }
}

/// Daily calorie target for one age, per the bracket table
#[must_use]
pub const fn daily_calories_for_age(age: u32) -> u32 {
    match age {
        0..=3 => 1200,
        4..=8 => 1600,
        9..=13 => 2000,
        14..=18 => 2400,
        19..=50 => 2200,
        _ => 1800,
    }
}

/// Estimate a household calorie profile from a comma-separated age list
///
/// # Errors
///
/// Returns `PlanError::EmptyAges` when no entry parses as an integer.
pub fn estimate(ages: &str) -> Result<CalorieProfile, PlanError> {
    let entries: Vec<CalorieEntry> = ages
        .split(',')
        .filter_map(|raw| raw.trim().parse::<u32>().ok())
        .map(|age| CalorieEntry {
            age,
            daily_calories: daily_calories_for_age(age),
        })
        .collect();

    if entries.is_empty() {
        return Err(PlanError::EmptyAges);
    }

    let total_daily_calories: u32 = entries.iter().map(|e| e.daily_calories).sum();
    let average_per_person = round_div(total_daily_calories, entries.len() as u32);

    Ok(CalorieProfile {
        entries,
        total_daily_calories,
        average_per_person,
    })
}

/// Integer division rounded to nearest
const fn round_div(dividend: u32, divisor: u32) -> u32 {
    (dividend + divisor / 2) / divisor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_boundaries() {
        assert_eq!(daily_calories_for_age(3), 1200);
        assert_eq!(daily_calories_for_age(4), 1600);
        assert_eq!(daily_calories_for_age(8), 1600);
        assert_eq!(daily_calories_for_age(9), 2000);
        assert_eq!(daily_calories_for_age(13), 2000);
        assert_eq!(daily_calories_for_age(14), 2400);
        assert_eq!(daily_calories_for_age(18), 2400);
        assert_eq!(daily_calories_for_age(19), 2200);
        assert_eq!(daily_calories_for_age(50), 2200);
        assert_eq!(daily_calories_for_age(51), 1800);
    }

    #[test]
    fn test_round_div_rounds_to_nearest() {
        assert_eq!(round_div(4000, 3), 1333);
        assert_eq!(round_div(5, 2), 3);
        assert_eq!(round_div(4400, 2), 2200);
    }
}
