// ABOUTME: Export serializers producing the plain-text and iCalendar artifacts
// ABOUTME: Deterministic over an explicit reference date, filenames follow meal-plan-<date>
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Export Serializers
//!
//! Two pure functions from a parsed plan to downloadable documents:
//!
//! - [`text_document`] — a flat, human-readable summary with one section per
//!   day and a shopping list grouped by category
//! - [`calendar_document`] — an iCalendar file with one event per (day, meal)
//!   pair, scheduled at fixed meal-time windows on the next occurrence of
//!   each plan day's weekday
//!
//! Both take the reference date as a parameter so output is reproducible;
//! callers pass the current date.

use std::fmt::Write as _;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use super::calories::CalorieProfile;
use super::{MealPlan, MealType};

/// Filename for the text artifact, `meal-plan-<ISO-date>.txt`
#[must_use]
pub fn text_filename(date: NaiveDate) -> String {
    format!("meal-plan-{}.txt", date.format("%Y-%m-%d"))
}

/// Filename for the calendar artifact, `meal-plan-<ISO-date>.ics`
#[must_use]
pub fn calendar_filename(date: NaiveDate) -> String {
    format!("meal-plan-{}.ics", date.format("%Y-%m-%d"))
}

// ============================================================================
// Text Export
// ============================================================================

/// Render the plan as a flat text document
///
/// Day order and grocery category order follow the plan exactly. The calorie
/// target block is included only when a profile is supplied.
#[must_use]
pub fn text_document(
    plan: &MealPlan,
    profile: Option<&CalorieProfile>,
    generated_on: NaiveDate,
) -> String {
    let mut out = String::new();

    out.push_str("WEEKLY MEAL PLAN\n");
    let _ = writeln!(out, "Generated: {}", generated_on.format("%Y-%m-%d"));
    out.push('\n');

    if let Some(profile) = profile {
        out.push_str("CALORIE TARGETS:\n");
        let _ = writeln!(
            out,
            "Total family daily needs: {} calories",
            profile.total_daily_calories
        );
        let _ = writeln!(
            out,
            "Average per person: {} calories/day",
            profile.average_per_person
        );
        out.push('\n');
    }

    for day in &plan.days {
        let heading = day.day.to_uppercase();
        let _ = writeln!(out, "{heading}");
        let _ = writeln!(out, "{}", "=".repeat(day.day.len()));

        for (meal_type, meal) in &day.meals {
            let _ = writeln!(out, "\n{}: {}", meal_type.as_str().to_uppercase(), meal.name);
            let _ = writeln!(out, "Description: {}", meal.description);
            let _ = writeln!(out, "Prep time: {} minutes", meal.prep_time);
            if let Some(calories) = meal.calories {
                let _ = writeln!(out, "Calories per serving: {calories}");
            }
            if let Some(url) = &meal.recipe_url {
                let _ = writeln!(out, "Recipe: {url}");
            }
            let _ = writeln!(out, "Ingredients: {}", meal.ingredients.join(", "));
        }
        out.push('\n');
    }

    out.push_str("\nSHOPPING LIST\n=============\n");
    for (category, items) in plan.grocery_list.categories() {
        let _ = writeln!(out, "\n{}:", category.to_uppercase());
        for item in items {
            let _ = writeln!(out, "  \u{2022} {item}");
        }
    }

    out
}

// ============================================================================
// Calendar Export
// ============================================================================

/// Fixed time-of-day windows by meal slot, basic iCalendar time format
const fn meal_window(meal_type: MealType) -> (&'static str, &'static str) {
    match meal_type {
        MealType::Breakfast => ("080000", "090000"),
        MealType::Lunch => ("120000", "130000"),
        MealType::Dinner => ("180000", "190000"),
    }
}

/// Weekday for a plan day name, `None` for unrecognized names
fn weekday_for_day(day: &str) -> Option<Weekday> {
    match day {
        "Monday" => Some(Weekday::Mon),
        "Tuesday" => Some(Weekday::Tue),
        "Wednesday" => Some(Weekday::Wed),
        "Thursday" => Some(Weekday::Thu),
        "Friday" => Some(Weekday::Fri),
        "Saturday" => Some(Weekday::Sat),
        "Sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Next occurrence of `target` on or after `today` (0 days away means today)
fn next_occurrence(today: NaiveDate, target: Weekday) -> NaiveDate {
    let offset = (target.num_days_from_monday() + 7 - today.weekday().num_days_from_monday()) % 7;
    today + Duration::days(i64::from(offset))
}

/// Render the plan as an iCalendar document
///
/// One VEVENT per (day, meal) pair. Dates use the basic local format with no
/// timezone component; days with unrecognized names are skipped.
#[must_use]
pub fn calendar_document(plan: &MealPlan, today: NaiveDate) -> String {
    let mut ics = String::from("BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:-//Meal Planner//EN\n");

    for day in &plan.days {
        let Some(weekday) = weekday_for_day(&day.day) else {
            continue;
        };
        let date = next_occurrence(today, weekday);
        let date_str = date.format("%Y%m%d");

        for (meal_type, meal) in &day.meals {
            let (start, end) = meal_window(*meal_type);
            ics.push_str("BEGIN:VEVENT\n");
            let _ = writeln!(ics, "DTSTART:{date_str}T{start}");
            let _ = writeln!(ics, "DTEND:{date_str}T{end}");
            let _ = writeln!(ics, "SUMMARY:{}: {}", meal_type.label(), meal.name);

            // \n must stay literal inside DESCRIPTION per the iCalendar
            // text escaping rules
            let calorie_text = meal
                .calories
                .map(|c| format!("Calories: {c}\\n"))
                .unwrap_or_default();
            let _ = writeln!(
                ics,
                "DESCRIPTION:Prep: {} min\\n{}{}",
                meal.prep_time,
                calorie_text,
                meal.recipe_url.as_deref().unwrap_or("")
            );
            ics.push_str("END:VEVENT\n");
        }
    }

    ics.push_str("END:VCALENDAR");
    ics
}

/// Write both artifacts into `dir`, creating it if needed
///
/// Returns the text and calendar file paths. This is the download-to-disk
/// counterpart of the browser's export buttons, used by the CLI.
///
/// # Errors
///
/// Propagates filesystem errors from directory creation or writing.
pub fn write_artifacts(
    dir: &std::path::Path,
    plan: &MealPlan,
    profile: Option<&CalorieProfile>,
    date: NaiveDate,
) -> std::io::Result<(std::path::PathBuf, std::path::PathBuf)> {
    std::fs::create_dir_all(dir)?;

    let text_path = dir.join(text_filename(date));
    std::fs::write(&text_path, text_document(plan, profile, date))?;

    let calendar_path = dir.join(calendar_filename(date));
    std::fs::write(&calendar_path, calendar_document(plan, date))?;

    Ok((text_path, calendar_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_occurrence_today_counts() {
        // 2025-06-02 is a Monday
        let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert_eq!(next_occurrence(monday, Weekday::Mon), monday);
    }

    #[test]
    fn test_next_occurrence_wraps_week() {
        // Wednesday to the following Monday is five days
        let wednesday = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
        let next_monday = NaiveDate::from_ymd_opt(2025, 6, 9).unwrap();
        assert_eq!(next_occurrence(wednesday, Weekday::Mon), next_monday);
    }

    #[test]
    fn test_filenames() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
        assert_eq!(text_filename(date), "meal-plan-2025-06-04.txt");
        assert_eq!(calendar_filename(date), "meal-plan-2025-06-04.ics");
    }
}
