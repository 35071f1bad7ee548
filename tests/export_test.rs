// ABOUTME: Unit tests for the text and calendar export serializers
// ABOUTME: Section ordering, optional fields, weekday scheduling, and filenames
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use common::sample_plan;
use mealplan_server::mealplan::calories::estimate;
use mealplan_server::mealplan::export::{
    calendar_document, calendar_filename, text_document, text_filename,
};
use mealplan_server::mealplan::{DayPlan, GroceryList, Meal, MealPlan, MealType, DAY_NAMES};

const ALL_MEALS: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

fn plan_with_one_day(day: &str, meal_type: MealType, meal: Meal) -> MealPlan {
    let mut meals = BTreeMap::new();
    meals.insert(meal_type, meal);
    MealPlan {
        days: vec![DayPlan {
            day: day.to_owned(),
            meals,
        }],
        grocery_list: GroceryList::default(),
    }
}

fn breakfast_meal() -> Meal {
    Meal {
        name: "Masala Oats".to_owned(),
        description: "Quick spiced oats.".to_owned(),
        prep_time: 10,
        calories: Some(350),
        recipe_url: Some("https://example.com/oats".to_owned()),
        ingredients: vec!["oats".to_owned(), "spices".to_owned()],
    }
}

// ============================================================================
// Text Export Tests
// ============================================================================

#[test]
fn test_text_has_one_section_per_day_in_order() {
    let plan = sample_plan(&ALL_MEALS);
    let date = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
    let text = text_document(&plan, None, date);

    let mut last = 0;
    for day in DAY_NAMES {
        let heading = format!("{}\n{}", day.to_uppercase(), "=".repeat(day.len()));
        let pos = text.find(&heading).unwrap_or_else(|| panic!("missing section for {day}"));
        assert!(pos > last, "sections out of order at {day}");
        last = pos;
        assert_eq!(text.matches(&heading).count(), 1);
    }
}

#[test]
fn test_text_grocery_categories_appear_verbatim_in_order() {
    let plan = sample_plan(&ALL_MEALS);
    let date = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
    let text = text_document(&plan, None, date);

    let shopping = text.find("SHOPPING LIST").unwrap();
    let proteins = text.find("PROTEINS:").unwrap();
    let vegetables = text.find("VEGETABLES:").unwrap();
    let pantry = text.find("PANTRY:").unwrap();
    assert!(shopping < proteins && proteins < vegetables && vegetables < pantry);
    assert!(text.contains("  \u{2022} 2 lbs chicken breast"));
}

#[test]
fn test_text_calorie_block_requires_profile() {
    let plan = sample_plan(&ALL_MEALS);
    let date = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
    let profile = estimate("30, 32").unwrap();

    let with_profile = text_document(&plan, Some(&profile), date);
    assert!(with_profile.contains("CALORIE TARGETS:"));
    assert!(with_profile.contains("Total family daily needs: 4400 calories"));
    assert!(with_profile.contains("Average per person: 2200 calories/day"));

    let without_profile = text_document(&plan, None, date);
    assert!(!without_profile.contains("CALORIE TARGETS:"));
}

#[test]
fn test_text_optional_meal_fields() {
    let mut meal = breakfast_meal();
    meal.calories = None;
    meal.recipe_url = None;
    let plan = plan_with_one_day("Monday", MealType::Breakfast, meal);
    let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let text = text_document(&plan, None, date);

    assert!(text.contains("BREAKFAST: Masala Oats"));
    assert!(text.contains("Prep time: 10 minutes"));
    assert!(text.contains("Ingredients: oats, spices"));
    assert!(!text.contains("Calories per serving"));
    assert!(!text.contains("Recipe:"));
}

#[test]
fn test_text_header_carries_generation_date() {
    let plan = sample_plan(&ALL_MEALS);
    let date = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
    let text = text_document(&plan, None, date);
    assert!(text.starts_with("WEEKLY MEAL PLAN\nGenerated: 2025-06-04\n"));
}

// ============================================================================
// Calendar Export Tests
// ============================================================================

#[test]
fn test_calendar_monday_plan_on_wednesday_lands_next_monday() {
    // 2025-06-04 is a Wednesday; the upcoming Monday is five days later
    let plan = plan_with_one_day("Monday", MealType::Breakfast, breakfast_meal());
    let wednesday = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
    let ics = calendar_document(&plan, wednesday);

    assert!(ics.contains("DTSTART:20250609T080000"));
    assert!(ics.contains("DTEND:20250609T090000"));
}

#[test]
fn test_calendar_same_weekday_means_today() {
    // 2025-06-02 is a Monday; the event is scheduled today, not next week
    let plan = plan_with_one_day("Monday", MealType::Dinner, breakfast_meal());
    let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let ics = calendar_document(&plan, monday);

    assert!(ics.contains("DTSTART:20250602T180000"));
    assert!(ics.contains("DTEND:20250602T190000"));
}

#[test]
fn test_calendar_meal_windows() {
    let plan = sample_plan(&ALL_MEALS);
    let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let ics = calendar_document(&plan, date);

    assert!(ics.contains("T080000"));
    assert!(ics.contains("T120000"));
    assert!(ics.contains("T180000"));
    // One event per (day, meal) pair
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 21);
    assert_eq!(ics.matches("END:VEVENT").count(), 21);
}

#[test]
fn test_calendar_structure_and_description() {
    let plan = plan_with_one_day("Monday", MealType::Breakfast, breakfast_meal());
    let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let ics = calendar_document(&plan, date);

    assert!(ics.starts_with("BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:"));
    assert!(ics.ends_with("END:VCALENDAR"));
    assert!(ics.contains("SUMMARY:Breakfast: Masala Oats"));
    // \n stays literal inside the description per iCalendar escaping
    assert!(ics.contains("DESCRIPTION:Prep: 10 min\\nCalories: 350\\nhttps://example.com/oats"));
}

#[test]
fn test_calendar_description_without_calories() {
    let mut meal = breakfast_meal();
    meal.calories = None;
    meal.recipe_url = None;
    let plan = plan_with_one_day("Monday", MealType::Breakfast, meal);
    let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let ics = calendar_document(&plan, date);

    assert!(ics.contains("DESCRIPTION:Prep: 10 min\\n\n"));
    assert!(!ics.contains("Calories:"));
}

// ============================================================================
// Filename and Artifact Tests
// ============================================================================

#[test]
fn test_filenames_follow_iso_date_pattern() {
    let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
    assert_eq!(text_filename(date), "meal-plan-2025-12-31.txt");
    assert_eq!(calendar_filename(date), "meal-plan-2025-12-31.ics");
}

#[test]
fn test_write_artifacts_matches_serializer_output() {
    let plan = sample_plan(&ALL_MEALS);
    let profile = estimate("30, 32").unwrap();
    let date = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let (text_path, calendar_path) =
        mealplan_server::mealplan::export::write_artifacts(dir.path(), &plan, Some(&profile), date)
            .unwrap();

    assert_eq!(
        text_path.file_name().unwrap().to_str().unwrap(),
        "meal-plan-2025-06-04.txt"
    );
    assert_eq!(
        calendar_path.file_name().unwrap().to_str().unwrap(),
        "meal-plan-2025-06-04.ics"
    );
    assert_eq!(
        std::fs::read_to_string(&text_path).unwrap(),
        text_document(&plan, Some(&profile), date)
    );
    assert_eq!(
        std::fs::read_to_string(&calendar_path).unwrap(),
        calendar_document(&plan, date)
    );
}
