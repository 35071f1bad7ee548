// ABOUTME: Meal plan domain types shared by the pipeline stages and the HTTP surface
// ABOUTME: Defines the wire contract for plans plus the domain error taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Meal Plan Domain
//!
//! Types for the plan request and the structured plan the completion service
//! returns, plus the domain error enum. Wire field names (`prepTime`,
//! `recipeUrl`, `groceryList`) follow the JSON contract embedded in the
//! generation prompt, so a parsed plan re-serializes to the same shape the
//! model produced.
//!
//! The pipeline stages live in the submodules:
//! - [`calories`] — deterministic per-age calorie targets
//! - [`prompt`] — prompt construction with a dynamic schema template
//! - [`parser`] — code-fence cleanup and JSON parsing
//! - [`export`] — text and iCalendar serializers
//! - [`pipeline`] — orchestration over a completion provider

pub mod calories;
pub mod export;
pub mod parser;
pub mod pipeline;
pub mod prompt;

pub use calories::{CalorieEntry, CalorieProfile};
pub use pipeline::{GeneratedPlan, PlanGenerator};

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::AppError;

/// Recognized day names, in plan order
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

// ============================================================================
// Meal Types
// ============================================================================

/// Meal slots a plan can cover
///
/// Declaration order is meaningful: `Ord` follows it, so map iteration and
/// serialization always run breakfast, lunch, dinner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    /// All meal types, in slot order
    pub const ALL: [Self; 3] = [Self::Breakfast, Self::Lunch, Self::Dinner];

    /// Lowercase wire name, as used in prompt schema keys and JSON
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }

    /// Capitalized label for human-facing output (calendar summaries)
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MealType {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            other => Err(PlanError::UnknownMealType(other.to_owned())),
        }
    }
}

// ============================================================================
// Dietary Preferences
// ============================================================================

/// Dietary preference options from the form
///
/// Each preference maps to zero or one imperative directive injected into the
/// prompt; preferences without a directive are only named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryPreference {
    #[default]
    None,
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
    LowCarb,
    Keto,
    NoFish,
    NoRedMeat,
    SimpleCooking,
    Pescatarian,
    Paleo,
    Halal,
    Kosher,
}

impl DietaryPreference {
    /// Kebab-case wire token, as submitted by the form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Vegetarian => "vegetarian",
            Self::Vegan => "vegan",
            Self::GlutenFree => "gluten-free",
            Self::DairyFree => "dairy-free",
            Self::LowCarb => "low-carb",
            Self::Keto => "keto",
            Self::NoFish => "no-fish",
            Self::NoRedMeat => "no-red-meat",
            Self::SimpleCooking => "simple-cooking",
            Self::Pescatarian => "pescatarian",
            Self::Paleo => "paleo",
            Self::Halal => "halal",
            Self::Kosher => "kosher",
        }
    }

    /// How the preference is named inside the prompt
    #[must_use]
    pub const fn prompt_label(&self) -> &'static str {
        match self {
            Self::None => "No restrictions",
            other => other.as_str(),
        }
    }

    /// Imperative clause injected into the prompt, if the preference has one
    #[must_use]
    pub const fn directive(&self) -> Option<&'static str> {
        match self {
            Self::SimpleCooking => Some(
                "IMPORTANT: All meals must have 15 minutes or less prep time. \
                 Focus on quick recipes like salads, sandwiches, wraps, smoothie bowls, \
                 one-pot meals, quick stir-fries, and minimal-prep dishes.",
            ),
            Self::NoFish => Some("IMPORTANT: Do not include any fish or seafood."),
            Self::NoRedMeat => Some(
                "IMPORTANT: Do not include beef, pork, lamb, or other red meats. \
                 Chicken, turkey, fish, and plant-based proteins are fine.",
            ),
            _ => None,
        }
    }
}

impl fmt::Display for DietaryPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DietaryPreference {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .find(|p| p.as_str() == token)
            .copied()
            .ok_or(PlanError::UnknownDietaryPreference(token))
    }
}

impl DietaryPreference {
    /// Every supported preference
    pub const ALL: [Self; 14] = [
        Self::None,
        Self::Vegetarian,
        Self::Vegan,
        Self::GlutenFree,
        Self::DairyFree,
        Self::LowCarb,
        Self::Keto,
        Self::NoFish,
        Self::NoRedMeat,
        Self::SimpleCooking,
        Self::Pescatarian,
        Self::Paleo,
        Self::Halal,
        Self::Kosher,
    ];
}

// ============================================================================
// Plan Request
// ============================================================================

/// Form input driving one plan generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    /// Number of people in the household
    pub family_size: u32,
    /// Comma-separated age list, passed to the prompt verbatim
    pub ages: String,
    /// Dietary preference for the whole household
    #[serde(default)]
    pub dietary: DietaryPreference,
    /// Meal slots the plan should cover
    pub meals: Vec<MealType>,
}

impl PlanRequest {
    /// Check the request invariants that don't require parsing ages
    ///
    /// # Errors
    ///
    /// Returns `PlanError::NoMealsSelected` or `PlanError::InvalidFamilySize`.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.meals.is_empty() {
            return Err(PlanError::NoMealsSelected);
        }
        if self.family_size == 0 {
            return Err(PlanError::InvalidFamilySize);
        }
        Ok(())
    }

    /// The requested meal slots as a set, duplicates collapsed
    #[must_use]
    pub fn meal_set(&self) -> BTreeSet<MealType> {
        self.meals.iter().copied().collect()
    }
}

// ============================================================================
// Parsed Plan
// ============================================================================

/// One meal within a day
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub name: String,
    pub description: String,
    /// Preparation time in minutes
    pub prep_time: u32,
    /// Estimated calories per serving, when the model provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    /// Recipe link, when the model provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// One day of the plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    /// Day name, one of [`DAY_NAMES`] after validation
    pub day: String,
    /// Meals keyed by slot; iterates in slot order
    pub meals: BTreeMap<MealType, Meal>,
}

/// Consolidated grocery list, category name to quantified item strings
///
/// Backed by a `serde_json::Map` so category insertion order survives a
/// parse/serialize round trip (`preserve_order`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroceryList(pub serde_json::Map<String, serde_json::Value>);

impl GroceryList {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Categories in insertion order with their item strings
    ///
    /// Non-string entries are skipped here; `MealPlan::validate` rejects them
    /// up front for plans that went through the pipeline.
    pub fn categories(&self) -> impl Iterator<Item = (&str, Vec<&str>)> {
        self.0.iter().map(|(name, items)| {
            let items = items
                .as_array()
                .map(|a| a.iter().filter_map(serde_json::Value::as_str).collect())
                .unwrap_or_default();
            (name.as_str(), items)
        })
    }
}

/// A full weekly plan as returned by the completion service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub days: Vec<DayPlan>,
    pub grocery_list: GroceryList,
}

impl MealPlan {
    /// Validate the plan against the requested meal selection
    ///
    /// Checks the invariants the prompt asks the model to uphold: exactly one
    /// entry per weekday, every day's meal keys equal to the requested slot
    /// set, and grocery categories mapping to lists of item strings.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::Schema` describing the first mismatch found.
    pub fn validate(&self, requested: &[MealType]) -> Result<(), PlanError> {
        if self.days.len() != DAY_NAMES.len() {
            return Err(PlanError::Schema(format!(
                "expected {} days, got {}",
                DAY_NAMES.len(),
                self.days.len()
            )));
        }

        let requested: BTreeSet<MealType> = requested.iter().copied().collect();
        let mut seen = [false; DAY_NAMES.len()];
        for day in &self.days {
            let idx = DAY_NAMES
                .iter()
                .position(|name| *name == day.day)
                .ok_or_else(|| PlanError::Schema(format!("unrecognized day name '{}'", day.day)))?;
            if seen[idx] {
                return Err(PlanError::Schema(format!("duplicate day '{}'", day.day)));
            }
            seen[idx] = true;

            let keys: BTreeSet<MealType> = day.meals.keys().copied().collect();
            if keys != requested {
                return Err(PlanError::Schema(format!(
                    "meals for {} do not match the requested selection",
                    day.day
                )));
            }
        }

        for (category, items) in &self.grocery_list.0 {
            let is_item_list = items
                .as_array()
                .is_some_and(|a| a.iter().all(serde_json::Value::is_string));
            if !is_item_list {
                return Err(PlanError::Schema(format!(
                    "grocery category '{category}' is not a list of items"
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Domain Errors
// ============================================================================

/// Errors raised by the plan pipeline stages
///
/// These convert into [`AppError`] at the HTTP boundary so every failure
/// reduces to the standard error envelope.
#[derive(Debug, Error)]
pub enum PlanError {
    /// No age in the list parsed as an integer
    #[error("no parseable ages were provided")]
    EmptyAges,

    /// The meal selection was empty
    #[error("at least one meal type must be selected")]
    NoMealsSelected,

    /// Household size below one
    #[error("family size must be at least 1")]
    InvalidFamilySize,

    /// An unrecognized meal slot token
    #[error("unknown meal type: {0}")]
    UnknownMealType(String),

    /// An unrecognized dietary preference token
    #[error("unknown dietary preference: {0}")]
    UnknownDietaryPreference(String),

    /// The completion text was not valid JSON
    #[error("completion was not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The completion parsed but does not match the requested plan shape
    #[error("plan does not match the requested shape: {0}")]
    Schema(String),
}

impl From<PlanError> for AppError {
    fn from(error: PlanError) -> Self {
        match error {
            PlanError::EmptyAges
            | PlanError::NoMealsSelected
            | PlanError::InvalidFamilySize
            | PlanError::UnknownMealType(_)
            | PlanError::UnknownDietaryPreference(_) => Self::invalid_input(error.to_string()),
            PlanError::InvalidJson(_) | PlanError::Schema(_) => {
                Self::invalid_completion(error.to_string())
            }
        }
    }
}
