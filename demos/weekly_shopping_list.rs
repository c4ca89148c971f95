//! # Weekly Shopping List Example
//!
//! Walks through the pipeline one stage at a time: parsing single lines,
//! categorizing names, then generating and printing a week's shopping list.

use chrono::NaiveDate;
use serde_json::json;
use shopping_list::config::{ProvenanceMode, ShoppingListConfig};
use shopping_list::ingredient_categorizer::{categorize_ingredient, suggested_shopping_order_labels};
use shopping_list::ingredient_model::{MealPlanEntry, Recipe};
use shopping_list::ingredient_parser::parse_ingredient;
use shopping_list::shopping_list::ShoppingListGenerator;
use shopping_list::shopping_list_display::format_shopping_list;

fn main() -> anyhow::Result<()> {
    println!("🛒 Weekly Shopping List Example\n");

    // Example 1: Parsing single ingredient lines
    println!("📝 Example 1: Parsing Ingredient Lines");
    for line in [
        "2 1/2 cups olive oil",
        "200g chicken breast",
        "3 large eggs",
        "2-3 cloves garlic, minced",
        "1½ cups milk",
        "salt to taste",
        "a handful of parsley",
    ] {
        let parsed = parse_ingredient(line);
        println!("  {:<28} → {} [{}]", line, parsed, parsed.category);
    }
    println!();

    // Example 2: Categorizing names
    println!("📝 Example 2: Categorizing Names");
    for name in ["paneer", "frozen peas", "basmati rice", "dish soap", "saffron threads"] {
        println!("  {:<16} → {}", name, categorize_ingredient(name));
    }
    println!("  Store order: {}", suggested_shopping_order_labels().join(" → "));
    println!();

    // Example 3: Generating a week's list
    println!("📝 Example 3: Generating a Shopping List");
    let recipes: Vec<Recipe> = serde_json::from_value(json!([
        {
            "id": "shakshuka",
            "ingredients": "[\"2 tbsp olive oil\", \"1 onion, diced\", \"3 cloves garlic\", \"6 large eggs\", \"salt to taste\"]",
            "servings": 2
        },
        {
            "id": "garlic-rice",
            "ingredients": "1 cup basmati rice\n2 cloves garlic\n1 tbsp butter",
            "servings": 4
        }
    ]))?;
    let entries: Vec<MealPlanEntry> = serde_json::from_value(json!([
        {"id": "mon-breakfast", "recipeId": "shakshuka", "servings": 4, "date": "2024-05-06"},
        {"id": "tue-dinner", "recipeId": "garlic-rice", "servings": 2, "date": "2024-05-07"},
        {"id": "thu-dinner", "recipeId": "garlic-rice", "servings": 6, "date": "2024-05-09"}
    ]))?;

    let week_start = NaiveDate::from_ymd_opt(2024, 5, 6).ok_or_else(|| anyhow::anyhow!("bad date"))?;
    let generator = ShoppingListGenerator::new(ShoppingListConfig {
        provenance: ProvenanceMode::All,
        restrict_to_week: true,
    });
    let items = generator.generate(&entries, &recipes, week_start, "demo-user");

    print!("{}", format_shopping_list(&items));
    println!();

    // Example 4: Records handed to the data layer
    println!("📝 Example 4: Output Records");
    println!("{}", serde_json::to_string_pretty(&items[..2.min(items.len())])?);

    Ok(())
}
