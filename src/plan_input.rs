//! # Plan Input Loading
//!
//! Reads the JSON document the `shopping-list` binary works from: the recipes
//! and meal plan entries already fetched from the data layer.

use crate::ingredient_model::{MealPlanEntry, Recipe};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Recipes and meal plan entries for one shopping list run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanInput {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub meal_plan_entries: Vec<MealPlanEntry>,
}

impl PlanInput {
    /// Decode a plan document from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to decode plan input JSON")
    }
}

/// Load a plan document from disk
pub fn load_plan_input<P: AsRef<Path>>(path: P) -> Result<PlanInput> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read plan input from {}", path.display()))?;

    let plan = PlanInput::from_json(&text)
        .with_context(|| format!("Invalid plan input in {}", path.display()))?;

    info!(
        path = %path.display(),
        recipes = plan.recipes.len(),
        entries = plan.meal_plan_entries.len(),
        "Loaded plan input"
    );
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sections_default_to_empty() {
        let plan = PlanInput::from_json("{}").unwrap();
        assert!(plan.recipes.is_empty());
        assert!(plan.meal_plan_entries.is_empty());
    }

    #[test]
    fn test_decodes_camel_case_document() {
        let plan = PlanInput::from_json(
            r#"{
                "recipes": [{"id": "r1", "ingredients": "1 cup rice", "servings": 2}],
                "mealPlanEntries": [{"id": "e1", "recipeId": "r1", "servings": "4"}]
            }"#,
        )
        .unwrap();

        assert_eq!(plan.recipes[0].servings, Some(2.0));
        assert_eq!(plan.meal_plan_entries[0].recipe_id, "r1");
        assert_eq!(plan.meal_plan_entries[0].servings, Some(4.0));
    }

    #[test]
    fn test_unusable_dates_do_not_block_the_plan() {
        let plan = PlanInput::from_json(
            r#"{
                "mealPlanEntries": [
                    {"id": "e1", "recipeId": "r1", "date": 20240506},
                    {"id": "e2", "recipeId": "r1", "date": {"day": 6}},
                    {"id": "e3", "recipeId": "r1", "date": "next tuesday"},
                    {"id": "e4", "recipeId": "r1", "date": null},
                    {"id": "e5", "recipeId": "r1", "date": "2024-05-07"}
                ]
            }"#,
        )
        .unwrap();

        let dates: Vec<Option<chrono::NaiveDate>> =
            plan.meal_plan_entries.iter().map(|entry| entry.date).collect();
        assert_eq!(
            dates,
            vec![None, None, None, None, chrono::NaiveDate::from_ymd_opt(2024, 5, 7)]
        );
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = PlanInput::from_json("{ not json").unwrap_err();
        assert!(err.to_string().contains("plan input"));
    }
}
