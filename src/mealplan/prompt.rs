// ABOUTME: Prompt construction for the weekly plan generation request
// ABOUTME: Injects preference directives, calorie targets, and a dynamic JSON schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Prompt Builder
//!
//! Renders the natural-language instruction sent to the completion service.
//! Pure and deterministic: identical inputs produce an identical string.
//! The embedded schema template lists only the selected meal slots, so the
//! model never sees (or returns) keys for meals the household skipped.

use std::fmt::Write as _;

use super::calories::CalorieProfile;
use super::{MealType, PlanRequest};

/// Grocery categories the model is asked to group the shopping list by
const GROCERY_CATEGORIES: &str =
    "Proteins, Vegetables, Fruits, Grains, Dairy, Pantry, Spices & Aromatics";

/// Build the full generation prompt for one plan request
#[must_use]
pub fn build_prompt(request: &PlanRequest, profile: &CalorieProfile) -> String {
    let meals: Vec<&str> = request.meals.iter().map(MealType::as_str).collect();
    let meal_list = meals.join(", ");

    let mut s = String::new();

    let _ = writeln!(
        s,
        "Create a healthy 7-day meal plan for a family of {} people (ages: {}).",
        request.family_size, request.ages
    );
    let _ = writeln!(
        s,
        "Dietary preference: {}.",
        request.dietary.prompt_label()
    );
    if let Some(directive) = request.dietary.directive() {
        let _ = writeln!(s, "{directive}");
    }

    s.push_str("\nCALORIC REQUIREMENTS:\n");
    let _ = writeln!(
        s,
        "- Total daily caloric need for the family: {} calories",
        profile.total_daily_calories
    );
    let _ = writeln!(
        s,
        "- Average per person: {} calories/day",
        profile.average_per_person
    );
    let _ = writeln!(
        s,
        "- Target calories per meal: approximately {} total calories for the family",
        profile.per_meal_target(request.meals.len())
    );
    let _ = writeln!(
        s,
        "- Ensure meals are nutritionally balanced and appropriate for ages: {}",
        request.ages
    );
    s.push_str(
        "- Consider portion sizes appropriate for different ages \
         (smaller portions for children, larger for teenagers/adults)\n",
    );

    let _ = writeln!(s, "\nInclude only these meals: {meal_list}.");

    s.push_str(
        "\nIMPORTANT: Include diverse ethnic cuisines throughout the week. \
         Draw from Chinese, Indian, Thai, Japanese, Korean, Mexican, Mediterranean, \
         Middle Eastern, Vietnamese, and other global cuisines.\n",
    );

    s.push_str("\nFor each day (Monday-Sunday), provide for each included meal type:\n");
    s.push_str("1. Meal name (include cuisine type)\n");
    s.push_str("2. Brief description (1-2 sentences)\n");
    s.push_str("3. Preparation time in minutes\n");
    s.push_str("4. Estimated calories per serving\n");
    s.push_str("5. A specific recipe URL from reputable cooking websites\n");
    s.push_str("6. Key ingredients\n");

    let _ = writeln!(
        s,
        "\nAt the end, provide a consolidated grocery list organized by category \
         ({GROCERY_CATEGORIES}) with specific quantities for {} people.",
        request.family_size
    );

    s.push_str("\nRespond ONLY with valid JSON (no markdown). Use this exact structure:\n");
    s.push_str(&schema_template(&request.meals));

    s
}

/// JSON structure template with meal keys generated from the selection
fn schema_template(meals: &[MealType]) -> String {
    let meal_entries: Vec<String> = meals
        .iter()
        .map(|meal| {
            format!(
                "        \"{}\": {{\"name\": \"...\", \"description\": \"...\", \
                 \"prepTime\": 30, \"calories\": 500, \"recipeUrl\": \"https://...\", \
                 \"ingredients\": [\"...\", \"...\"]}}",
                meal.as_str()
            )
        })
        .collect();

    let mut t = String::from("{\n");
    t.push_str("  \"days\": [\n");
    t.push_str("    {\n");
    t.push_str("      \"day\": \"Monday\",\n");
    t.push_str("      \"meals\": {\n");
    t.push_str(&meal_entries.join(",\n"));
    t.push('\n');
    t.push_str("      }\n");
    t.push_str("    }\n");
    t.push_str("  ],\n");
    t.push_str("  \"groceryList\": {\n");
    t.push_str("    \"Proteins\": [\"2 lbs chicken breast\"],\n");
    t.push_str("    \"Vegetables\": [\"3 large tomatoes\"],\n");
    t.push_str("    \"Fruits\": [\"6 bananas\"],\n");
    t.push_str("    \"Grains\": [\"1 box pasta (16 oz)\"],\n");
    t.push_str("    \"Dairy\": [\"1 gallon milk\"],\n");
    t.push_str("    \"Spices & Aromatics\": [\"1 bunch cilantro\"],\n");
    t.push_str("    \"Pantry\": [\"1 bottle olive oil\"]\n");
    t.push_str("  }\n");
    t.push('}');
    t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mealplan::calories;
    use crate::mealplan::DietaryPreference;

    fn request(meals: Vec<MealType>) -> PlanRequest {
        PlanRequest {
            family_size: 2,
            ages: "30, 32".to_owned(),
            dietary: DietaryPreference::None,
            meals,
        }
    }

    #[test]
    fn test_schema_keys_follow_selection() {
        let schema = schema_template(&[MealType::Breakfast, MealType::Dinner]);
        assert!(schema.contains("\"breakfast\""));
        assert!(schema.contains("\"dinner\""));
        assert!(!schema.contains("\"lunch\""));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let req = request(vec![MealType::Breakfast, MealType::Lunch, MealType::Dinner]);
        let profile = calories::estimate(&req.ages).unwrap();
        assert_eq!(build_prompt(&req, &profile), build_prompt(&req, &profile));
    }
}
