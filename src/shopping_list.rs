//! # Shopping List Generator
//!
//! Turns a week of meal plan entries into shopping list records:
//!
//! 1. Resolve each entry's recipe by id (entries without one are skipped)
//! 2. Normalize the recipe's ingredients into lines and parse each line
//! 3. Scale every parsed quantity by planned servings / recipe servings
//! 4. Consolidate across all entries by `(name, unit)`
//! 5. Shape each consolidated row into a [`ShoppingListItem`]
//!
//! Bad data never fails the whole list. A missing recipe or an unreadable
//! ingredients field only removes that entry's contribution.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use shopping_list::ingredient_model::{MealPlanEntry, Recipe, RecipeIngredients};
//! use shopping_list::shopping_list::generate_shopping_list;
//!
//! let recipe = Recipe {
//!     id: "r1".to_string(),
//!     title: None,
//!     ingredients: Some(RecipeIngredients::Text("1 cup rice\n2 cloves garlic".to_string())),
//!     servings: Some(2.0),
//! };
//! let entry = MealPlanEntry {
//!     id: "e1".to_string(),
//!     recipe_id: "r1".to_string(),
//!     servings: Some(4.0),
//!     date: None,
//!     meal_type: None,
//! };
//!
//! let week = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
//! let items = generate_shopping_list(&[entry], &[recipe], week, "user-1");
//!
//! assert_eq!(items.len(), 2);
//! assert_eq!(items[0].quantity, "2");
//! assert_eq!(items[1].to_string(), "4 clove garlic");
//! ```

use crate::config::{ProvenanceMode, ShoppingListConfig, WEEK_LENGTH_DAYS};
use crate::consolidator::consolidate_ingredients;
use crate::ingredient_model::{
    format_quantity, ConsolidatedIngredient, MealPlanEntry, ParsedIngredient,
    ParsedIngredientWithProvenance, Recipe, ShoppingListItem,
};
use crate::ingredient_parser::parse_ingredient;
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use tracing::{debug, info};

/// Divisor used when a recipe does not say how many servings it makes
pub const DEFAULT_RECIPE_SERVINGS: f64 = 1.0;

/// Builds shopping list records from meal plan entries and recipes
#[derive(Debug, Clone, Default)]
pub struct ShoppingListGenerator {
    config: ShoppingListConfig,
}

impl ShoppingListGenerator {
    pub fn new(config: ShoppingListConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ShoppingListConfig {
        &self.config
    }

    /// Generate shopping list records for one user and week
    pub fn generate(
        &self,
        entries: &[MealPlanEntry],
        recipes: &[Recipe],
        week_start_date: NaiveDate,
        user_id: &str,
    ) -> Vec<ShoppingListItem> {
        let occurrences = if self.config.restrict_to_week {
            collect_scaled_ingredients(entries_for_week(entries, week_start_date), recipes)
        } else {
            collect_scaled_ingredients(entries, recipes)
        };

        let items: Vec<ShoppingListItem> = consolidate_ingredients(&occurrences)
            .iter()
            .map(|row| self.to_item(row, week_start_date, user_id))
            .collect();

        info!(
            user_id,
            week_start = %week_start_date,
            entries = entries.len(),
            items = items.len(),
            "Generated shopping list"
        );
        items
    }

    fn to_item(
        &self,
        row: &ConsolidatedIngredient,
        week_start_date: NaiveDate,
        user_id: &str,
    ) -> ShoppingListItem {
        let (source_recipe_ids, source_meal_plan_entry_ids) = match self.config.provenance {
            ProvenanceMode::First => (Vec::new(), Vec::new()),
            ProvenanceMode::All => (row.recipe_ids.clone(), row.meal_plan_entry_ids.clone()),
        };

        ShoppingListItem {
            user_id: user_id.to_string(),
            week_start_date,
            item_name: row.name.clone(),
            quantity: format_quantity(row.total_quantity),
            unit: row.unit.as_str().to_string(),
            category: row.category,
            is_completed: false,
            recipe_id: row.recipe_ids.first().cloned(),
            meal_plan_entry_id: row.meal_plan_entry_ids.first().cloned(),
            source_recipe_ids,
            source_meal_plan_entry_ids,
        }
    }
}

/// Generate shopping list records with the default configuration
pub fn generate_shopping_list(
    entries: &[MealPlanEntry],
    recipes: &[Recipe],
    week_start_date: NaiveDate,
    user_id: &str,
) -> Vec<ShoppingListItem> {
    ShoppingListGenerator::default().generate(entries, recipes, week_start_date, user_id)
}

/// Ratio of planned servings to the servings a recipe is written for
///
/// A recipe without a usable serving count is treated as making one serving.
/// An entry without a usable serving count, or a ratio that underflows to zero
/// or overflows, is taken at the recipe's own size.
pub fn serving_multiplier(entry: &MealPlanEntry, recipe: &Recipe) -> f64 {
    let baseline = recipe
        .servings
        .filter(|servings| is_usable_amount(*servings))
        .unwrap_or(DEFAULT_RECIPE_SERVINGS);

    entry
        .servings
        .filter(|planned| is_usable_amount(*planned))
        .map(|planned| planned / baseline)
        .filter(|ratio| is_usable_amount(*ratio))
        .unwrap_or(1.0)
}

fn is_usable_amount(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Scale one parsed ingredient, keeping the recipe amount if scaling breaks it
fn scale_ingredient(ingredient: &ParsedIngredient, multiplier: f64) -> ParsedIngredient {
    let scaled = ingredient.scaled(multiplier);
    if is_usable_amount(scaled.quantity) {
        scaled
    } else {
        debug!(
            name = %ingredient.name,
            quantity = ingredient.quantity,
            multiplier,
            "Scaled quantity out of range, keeping recipe amount"
        );
        ingredient.clone()
    }
}

/// Parse and scale every ingredient of every entry's recipe
///
/// Each returned occurrence is tagged with the recipe and entry it came from, in
/// entry order and then ingredient order.
pub fn collect_scaled_ingredients<'a, I>(
    entries: I,
    recipes: &[Recipe],
) -> Vec<ParsedIngredientWithProvenance>
where
    I: IntoIterator<Item = &'a MealPlanEntry>,
{
    let recipes_by_id: HashMap<&str, &Recipe> = recipes
        .iter()
        .map(|recipe| (recipe.id.as_str(), recipe))
        .collect();
    let mut parsed_by_recipe: HashMap<&str, Vec<ParsedIngredient>> = HashMap::new();
    let mut occurrences = Vec::new();

    for entry in entries {
        let Some(recipe) = recipes_by_id.get(entry.recipe_id.as_str()).copied() else {
            debug!(
                entry_id = %entry.id,
                recipe_id = %entry.recipe_id,
                "Skipping meal plan entry without a matching recipe"
            );
            continue;
        };

        let parsed = parsed_by_recipe
            .entry(recipe.id.as_str())
            .or_insert_with(|| parse_recipe_ingredients(recipe));

        let multiplier = serving_multiplier(entry, recipe);
        occurrences.extend(
            parsed
                .iter()
                .map(|ingredient| {
                    scale_ingredient(ingredient, multiplier).with_provenance(&recipe.id, &entry.id)
                }),
        );
    }

    occurrences
}

/// Meal plan entries dated within the seven days starting at `week_start`
///
/// Entries without a date are kept.
pub fn entries_for_week(entries: &[MealPlanEntry], week_start: NaiveDate) -> Vec<&MealPlanEntry> {
    let week_end = week_start.checked_add_signed(Duration::days(WEEK_LENGTH_DAYS));

    entries
        .iter()
        .filter(|entry| match entry.date {
            None => true,
            Some(date) => date >= week_start && week_end.map_or(true, |end| date < end),
        })
        .collect()
}

fn parse_recipe_ingredients(recipe: &Recipe) -> Vec<ParsedIngredient> {
    let lines = recipe
        .ingredients
        .as_ref()
        .map(|ingredients| ingredients.lines())
        .unwrap_or_default();

    if lines.is_empty() {
        debug!(recipe_id = %recipe.id, "Recipe has no usable ingredient lines");
    }

    lines.iter().map(|line| parse_ingredient(line)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient_model::RecipeIngredients;
    use crate::measurement_types::Unit;
    use serde_json::json;

    fn recipe(id: &str, lines: &[&str], servings: Option<f64>) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: None,
            ingredients: Some(RecipeIngredients::List(
                lines.iter().map(|line| json!(line)).collect(),
            )),
            servings,
        }
    }

    fn entry(id: &str, recipe_id: &str, servings: Option<f64>) -> MealPlanEntry {
        MealPlanEntry {
            id: id.to_string(),
            recipe_id: recipe_id.to_string(),
            servings,
            date: None,
            meal_type: None,
        }
    }

    fn week() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
    }

    #[test]
    fn test_serving_multiplier() {
        let r = recipe("r1", &[], Some(2.0));
        assert_eq!(serving_multiplier(&entry("e1", "r1", Some(4.0)), &r), 2.0);
        assert_eq!(serving_multiplier(&entry("e1", "r1", Some(1.0)), &r), 0.5);
        assert_eq!(serving_multiplier(&entry("e1", "r1", None), &r), 1.0);
        assert_eq!(serving_multiplier(&entry("e1", "r1", Some(0.0)), &r), 1.0);

        // Missing or zero baseline divides by one
        let no_baseline = recipe("r2", &[], None);
        assert_eq!(serving_multiplier(&entry("e1", "r2", Some(3.0)), &no_baseline), 3.0);
        let zero_baseline = recipe("r3", &[], Some(0.0));
        assert_eq!(serving_multiplier(&entry("e1", "r3", Some(3.0)), &zero_baseline), 3.0);
    }

    #[test]
    fn test_extreme_servings_keep_quantities_positive() {
        let tiny = recipe("tiny", &[], Some(1e300));
        assert_eq!(serving_multiplier(&entry("e1", "tiny", Some(1e-300)), &tiny), 1.0);
        let huge = recipe("huge", &[], Some(1e-300));
        assert_eq!(serving_multiplier(&entry("e1", "huge", Some(1e300)), &huge), 1.0);

        let recipes = vec![
            recipe("tiny", &["1 cup rice"], Some(1e300)),
            recipe("huge", &["1 cup flour"], Some(1e-300)),
        ];
        let entries = vec![entry("e1", "tiny", Some(1e-300)), entry("e2", "huge", Some(1e300))];

        let items = generate_shopping_list(&entries, &recipes, week(), "u1");
        let quantities: Vec<&str> = items.iter().map(|item| item.quantity.as_str()).collect();

        assert_eq!(quantities, vec!["1", "1"]);
    }

    #[test]
    fn test_scaled_quantity_out_of_range_keeps_recipe_amount() {
        let sugar = ParsedIngredient::new("sugar", f64::MAX, Unit::Gram);
        assert_eq!(scale_ingredient(&sugar, 10.0).quantity, f64::MAX);

        let saffron = ParsedIngredient::new("saffron", 1e-300, Unit::Gram);
        assert_eq!(scale_ingredient(&saffron, 1e-300).quantity, 1e-300);

        let rice = ParsedIngredient::new("rice", 2.0, Unit::Cup);
        assert_eq!(scale_ingredient(&rice, 1.5).quantity, 3.0);
    }

    #[test]
    fn test_scaling_applies_to_parsed_quantity() {
        let recipes = vec![recipe("r1", &["2 cups rice"], Some(2.0))];
        let entries = vec![entry("e1", "r1", Some(4.0))];

        let occurrences = collect_scaled_ingredients(&entries, &recipes);

        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].ingredient.quantity, 4.0);
        assert_eq!(occurrences[0].ingredient.unit, Unit::Cup);
        assert_eq!(occurrences[0].recipe_id, "r1");
        assert_eq!(occurrences[0].meal_plan_entry_id, "e1");
    }

    #[test]
    fn test_missing_recipe_is_skipped() {
        let recipes = vec![recipe("r1", &["1 cup rice"], Some(1.0))];
        let entries = vec![entry("e1", "nope", Some(1.0)), entry("e2", "r1", Some(1.0))];

        let items = generate_shopping_list(&entries, &recipes, week(), "u1");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].meal_plan_entry_id.as_deref(), Some("e2"));
    }

    #[test]
    fn test_recipe_without_ingredients_contributes_nothing() {
        let recipes = vec![
            Recipe {
                id: "empty".to_string(),
                title: None,
                ingredients: None,
                servings: Some(2.0),
            },
            recipe("r1", &["1 cup rice"], Some(1.0)),
        ];
        let entries = vec![entry("e1", "empty", Some(2.0)), entry("e2", "r1", Some(1.0))];

        let items = generate_shopping_list(&entries, &recipes, week(), "u1");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item_name, "rice");
    }

    #[test]
    fn test_first_provenance_only_by_default() {
        let recipes = vec![
            recipe("r1", &["2 cloves garlic"], Some(1.0)),
            recipe("r2", &["3 cloves garlic"], Some(1.0)),
        ];
        let entries = vec![entry("e1", "r1", Some(1.0)), entry("e2", "r2", Some(1.0))];

        let items = generate_shopping_list(&entries, &recipes, week(), "u1");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, "5");
        assert_eq!(items[0].recipe_id.as_deref(), Some("r1"));
        assert_eq!(items[0].meal_plan_entry_id.as_deref(), Some("e1"));
        assert!(items[0].source_recipe_ids.is_empty());
    }

    #[test]
    fn test_all_provenance_keeps_every_contributor() {
        let recipes = vec![
            recipe("r1", &["2 cloves garlic"], Some(1.0)),
            recipe("r2", &["3 cloves garlic"], Some(1.0)),
        ];
        let entries = vec![entry("e1", "r1", Some(1.0)), entry("e2", "r2", Some(1.0))];
        let generator = ShoppingListGenerator::new(ShoppingListConfig {
            provenance: ProvenanceMode::All,
            ..Default::default()
        });

        let items = generator.generate(&entries, &recipes, week(), "u1");

        assert_eq!(items[0].recipe_id.as_deref(), Some("r1"));
        assert_eq!(items[0].source_recipe_ids, vec!["r1", "r2"]);
        assert_eq!(items[0].source_meal_plan_entry_ids, vec!["e1", "e2"]);
    }

    #[test]
    fn test_entries_for_week() {
        let mut inside = entry("inside", "r1", None);
        inside.date = NaiveDate::from_ymd_opt(2024, 5, 12);
        let mut before = entry("before", "r1", None);
        before.date = NaiveDate::from_ymd_opt(2024, 5, 5);
        let mut after = entry("after", "r1", None);
        after.date = NaiveDate::from_ymd_opt(2024, 5, 13);
        let undated = entry("undated", "r1", None);

        let entries = vec![inside, before, after, undated];
        let kept: Vec<&str> = entries_for_week(&entries, week())
            .iter()
            .map(|entry| entry.id.as_str())
            .collect();

        assert_eq!(kept, vec!["inside", "undated"]);
    }

    #[test]
    fn test_restrict_to_week_drops_other_weeks() {
        let recipes = vec![recipe("r1", &["1 cup rice"], Some(1.0))];
        let mut next_week = entry("e1", "r1", Some(1.0));
        next_week.date = NaiveDate::from_ymd_opt(2024, 5, 20);
        let entries = vec![next_week];

        assert_eq!(generate_shopping_list(&entries, &recipes, week(), "u1").len(), 1);

        let generator = ShoppingListGenerator::new(ShoppingListConfig {
            restrict_to_week: true,
            ..Default::default()
        });
        assert!(generator.generate(&entries, &recipes, week(), "u1").is_empty());
    }
}
