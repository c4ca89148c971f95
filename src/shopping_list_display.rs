//! # Shopping List Display
//!
//! Arranges generated shopping list records the way a shopper walks a store and
//! renders them as a plain-text checklist.

use crate::ingredient_categorizer::{suggested_shopping_order, Category};
use crate::ingredient_model::ShoppingListItem;

/// Bucket records by category in suggested shopping order
///
/// Categories without records are skipped. Records keep their relative order
/// within a bucket.
pub fn group_by_category(items: &[ShoppingListItem]) -> Vec<(Category, Vec<&ShoppingListItem>)> {
    suggested_shopping_order()
        .iter()
        .filter_map(|&category| {
            let bucket: Vec<&ShoppingListItem> = items
                .iter()
                .filter(|item| item.category == category)
                .collect();
            (!bucket.is_empty()).then_some((category, bucket))
        })
        .collect()
}

/// Render the list as a checklist grouped under category headers
pub fn format_shopping_list(items: &[ShoppingListItem]) -> String {
    if items.is_empty() {
        return "Shopping list is empty.\n".to_string();
    }

    let mut output = String::new();
    for (index, (category, bucket)) in group_by_category(items).iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }
        output.push_str(&format!("{}:\n", category));
        for item in bucket {
            let mark = if item.is_completed { "x" } else { " " };
            output.push_str(&format!("  [{}] {}\n", mark, item));
        }
    }
    output
}
