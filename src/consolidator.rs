//! # Ingredient Consolidator
//!
//! Merges ingredient occurrences from many recipes and meal-plan entries into one
//! row per distinct `(name, unit)` pair.
//!
//! Names and units are compared case-insensitively. The same ingredient recorded in
//! two different units ("2 cups rice" and "200g rice") stays as two rows; no unit
//! conversion is attempted. Quantities are summed as-is, without rounding.

use crate::ingredient_model::{ConsolidatedIngredient, ParsedIngredientWithProvenance};
use log::debug;
use std::collections::HashMap;

/// Grouping key: lower-cased name and unit
fn consolidation_key(occurrence: &ParsedIngredientWithProvenance) -> (String, String) {
    (
        occurrence.ingredient.name.to_lowercase(),
        occurrence.ingredient.unit.as_str().to_lowercase(),
    )
}

/// Group occurrences by `(name, unit)` and sum their quantities
///
/// Rows come back in the order their key was first seen. Each row keeps one
/// recipe id and one meal-plan entry id per contributing occurrence.
pub fn consolidate_ingredients(
    items: &[ParsedIngredientWithProvenance],
) -> Vec<ConsolidatedIngredient> {
    let mut rows: Vec<ConsolidatedIngredient> = Vec::new();
    let mut index_by_key: HashMap<(String, String), usize> = HashMap::new();

    for occurrence in items {
        let key = consolidation_key(occurrence);
        match index_by_key.get(&key) {
            Some(&index) => rows[index].absorb(occurrence),
            None => {
                index_by_key.insert(key, rows.len());
                rows.push(ConsolidatedIngredient::from_occurrence(occurrence));
            }
        }
    }

    debug!(
        "Consolidated {} ingredient occurrences into {} rows",
        items.len(),
        rows.len()
    );
    rows
}
