//! # Shopping List Data Model
//!
//! This module defines the records that flow through the shopping-list pipeline:
//! what the parser produces for one ingredient line, what the consolidator merges
//! them into, the recipe and meal-plan records handed in by the data layer, and the
//! shopping-list records handed back to it.
//!
//! ## Core Concepts
//!
//! - **ParsedIngredient**: one ingredient line split into name, quantity and unit
//! - **ConsolidatedIngredient**: every occurrence of one (name, unit) pair summed
//! - **Recipe / MealPlanEntry**: read-only input records
//! - **ShoppingListItem**: output record shaped for persistence
//!
//! ## Usage
//!
//! ```rust
//! use shopping_list::ingredient_model::ParsedIngredient;
//! use shopping_list::measurement_types::Unit;
//!
//! let rice = ParsedIngredient::new("rice", 2.0, Unit::Cup);
//! assert_eq!(rice.category.as_str(), "Pantry");
//! assert_eq!(rice.scaled(1.5).quantity, 3.0);
//! assert_eq!(rice.to_string(), "2 cup rice");
//! ```

use crate::ingredient_categorizer::{categorize_ingredient, Category};
use crate::measurement_types::Unit;
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// A single ingredient line split into its parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    /// Cleaned ingredient name (e.g., "olive oil", "chicken breast")
    pub name: String,

    /// Amount, always greater than zero
    pub quantity: f64,

    /// Normalized unit
    pub unit: Unit,

    /// Grocery department the name was classified into
    pub category: Category,
}

/// A parsed ingredient tagged with the recipe and meal-plan entry it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedIngredientWithProvenance {
    #[serde(flatten)]
    pub ingredient: ParsedIngredient,
    pub recipe_id: String,
    pub meal_plan_entry_id: String,
}

/// All occurrences of one (name, unit) pair merged together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedIngredient {
    /// Name as spelled by the first occurrence
    pub name: String,

    /// Sum of every contributing quantity
    pub total_quantity: f64,

    pub unit: Unit,

    /// Category of the first occurrence
    pub category: Category,

    /// One entry per contributing occurrence, in encounter order
    pub recipe_ids: Vec<String>,

    /// One entry per contributing occurrence, in encounter order
    pub meal_plan_entry_ids: Vec<String>,
}

/// The `ingredients` field of a recipe as it arrives from the data layer
///
/// The data API stores ingredients either as an array, as a JSON-encoded array
/// inside a string, or as plain text with one ingredient per line or comma.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeIngredients {
    /// Already-materialized array
    List(Vec<Value>),
    /// JSON-encoded array or delimited plain text
    Text(String),
    /// Anything else; contributes no ingredient lines
    Unsupported(Value),
}

/// Recipe record as supplied by the data layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub ingredients: Option<RecipeIngredients>,

    /// Number of servings the ingredient list is written for
    #[serde(default, deserialize_with = "lenient_number")]
    pub servings: Option<f64>,
}

/// Meal plan entry as supplied by the data layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanEntry {
    pub id: String,

    pub recipe_id: String,

    /// Number of servings planned for this meal
    #[serde(default, deserialize_with = "lenient_number")]
    pub servings: Option<f64>,

    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,

    #[serde(default)]
    pub meal_type: Option<String>,
}

/// Shopping list record shaped for the persistence layer
///
/// Identity and timestamps are assigned by the data API on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    pub user_id: String,

    /// Serialized as an ISO date (`YYYY-MM-DD`)
    pub week_start_date: NaiveDate,

    pub item_name: String,

    /// Total quantity as a plain decimal string
    pub quantity: String,

    pub unit: String,

    pub category: Category,

    pub is_completed: bool,

    /// First contributing recipe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,

    /// First contributing meal plan entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_plan_entry_id: Option<String>,

    /// Every contributing recipe, only filled when full provenance is requested
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_recipe_ids: Vec<String>,

    /// Every contributing meal plan entry, only filled when full provenance is requested
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_meal_plan_entry_ids: Vec<String>,
}

impl ParsedIngredient {
    /// Create a parsed ingredient, classifying the name
    pub fn new(name: &str, quantity: f64, unit: Unit) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            unit,
            category: categorize_ingredient(name),
        }
    }

    /// Copy of this ingredient with the quantity multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            quantity: self.quantity * factor,
            ..self.clone()
        }
    }

    /// Tag this ingredient with where it came from
    pub fn with_provenance(
        self,
        recipe_id: &str,
        meal_plan_entry_id: &str,
    ) -> ParsedIngredientWithProvenance {
        ParsedIngredientWithProvenance {
            ingredient: self,
            recipe_id: recipe_id.to_string(),
            meal_plan_entry_id: meal_plan_entry_id.to_string(),
        }
    }
}

impl ConsolidatedIngredient {
    /// Start a consolidated row from its first occurrence
    pub fn from_occurrence(occurrence: &ParsedIngredientWithProvenance) -> Self {
        Self {
            name: occurrence.ingredient.name.clone(),
            total_quantity: occurrence.ingredient.quantity,
            unit: occurrence.ingredient.unit.clone(),
            category: occurrence.ingredient.category,
            recipe_ids: vec![occurrence.recipe_id.clone()],
            meal_plan_entry_ids: vec![occurrence.meal_plan_entry_id.clone()],
        }
    }

    /// Fold another occurrence of the same (name, unit) pair into this row
    pub fn absorb(&mut self, occurrence: &ParsedIngredientWithProvenance) {
        self.total_quantity += occurrence.ingredient.quantity;
        self.recipe_ids.push(occurrence.recipe_id.clone());
        self.meal_plan_entry_ids.push(occurrence.meal_plan_entry_id.clone());
    }

    /// Number of occurrences merged into this row
    pub fn occurrence_count(&self) -> usize {
        self.recipe_ids.len()
    }
}

impl RecipeIngredients {
    /// Normalize every representation to an ordered list of ingredient lines
    ///
    /// JSON-looking text that fails to decode falls back to delimiter splitting.
    /// Blank lines are dropped.
    pub fn lines(&self) -> Vec<String> {
        let lines = match self {
            RecipeIngredients::List(values) => values_to_lines(values),
            RecipeIngredients::Text(text) => text_to_lines(text),
            RecipeIngredients::Unsupported(value) => {
                debug!("Ignoring ingredients field of unsupported shape: {}", value);
                Vec::new()
            }
        };

        lines
            .into_iter()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect()
    }
}

fn values_to_lines(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(|value| match value {
            Value::String(line) => Some(line.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        })
        .collect()
}

fn text_to_lines(text: &str) -> Vec<String> {
    let trimmed = text.trim();

    if trimmed.starts_with('[') {
        match serde_json::from_str::<Vec<Value>>(trimmed) {
            Ok(values) => return values_to_lines(&values),
            Err(e) => debug!("Ingredients text is not a valid JSON array ({}), splitting instead", e),
        }
    }

    split_delimited(trimmed)
}

/// Split plain text on newlines, or on commas when it is a single line
fn split_delimited(text: &str) -> Vec<String> {
    let pieces: Vec<&str> = if text.contains('\n') {
        text.lines().collect()
    } else {
        text.split(',').collect()
    };

    pieces
        .into_iter()
        .map(|piece| {
            piece
                .trim()
                .trim_matches(|c: char| c == '[' || c == ']' || c == '"')
                .trim_start_matches(|c: char| c == '-' || c == '*' || c == '•')
                .trim()
                .to_string()
        })
        .collect()
}

/// Plain decimal rendering of a quantity ("4", "2.5")
pub fn format_quantity(quantity: f64) -> String {
    quantity.to_string()
}

/// Accept a JSON number or numeric string; anything else is treated as absent
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    })
}

/// Accept `YYYY-MM-DD` or a timestamp starting with one; anything else is treated as absent
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => {
            let day = text.get(..10).unwrap_or(text.as_str());
            NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
        }
        Some(other) => {
            debug!("Ignoring meal plan date that is not a string: {}", other);
            None
        }
        None => None,
    })
}

impl fmt::Display for ParsedIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::ToTaste => write!(f, "{} (to taste)", self.name),
            _ => write!(f, "{} {} {}", format_quantity(self.quantity), self.unit, self.name),
        }
    }
}

impl fmt::Display for ShoppingListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit == Unit::ToTaste.as_str() {
            write!(f, "{} (to taste)", self.item_name)
        } else {
            write!(f, "{} {} {}", self.quantity, self.unit, self.item_name)
        }
    }
}
