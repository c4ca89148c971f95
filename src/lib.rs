//! # Shopping List
//!
//! Turns recipe ingredient text and a week of meal plan entries into a
//! consolidated, categorized shopping list.
//!
//! The pipeline is parse → categorize → scale → consolidate → shape. Every
//! stage is a plain function over in-memory records; fetching recipes and
//! persisting the resulting list belong to the caller.

pub mod config;
pub mod consolidator;
pub mod errors;
pub mod ingredient_categorizer;
pub mod ingredient_model;
pub mod ingredient_parser;
pub mod measurement_patterns;
pub mod measurement_types;
pub mod plan_input;
pub mod shopping_list;
pub mod shopping_list_display;

pub use config::{ProvenanceMode, ShoppingListConfig};
pub use consolidator::consolidate_ingredients;
pub use ingredient_categorizer::{categorize_ingredient, suggested_shopping_order, Category};
pub use ingredient_model::{
    ConsolidatedIngredient, MealPlanEntry, ParsedIngredient, ParsedIngredientWithProvenance,
    Recipe, RecipeIngredients, ShoppingListItem,
};
pub use ingredient_parser::parse_ingredient;
pub use measurement_types::Unit;
pub use shopping_list::{generate_shopping_list, ShoppingListGenerator};
