//! # Ingredient Categorizer
//!
//! Maps a cleaned ingredient name to the grocery department it is shopped in.
//!
//! Categories are checked in a fixed priority order and the first category with a
//! keyword contained in the lower-cased name wins. A name matching keywords from two
//! categories therefore lands in whichever is checked first, not the more specific one
//! (`"peanut butter"` is Dairy because Dairy is checked before Snacks & Sweets).
//!
//! ```rust
//! use shopping_list::ingredient_categorizer::{categorize_ingredient, Category};
//!
//! assert_eq!(categorize_ingredient("Garlic"), Category::Produce);
//! assert_eq!(categorize_ingredient("chicken breast").as_str(), "Meat & Seafood");
//! assert_eq!(categorize_ingredient("unobtainium"), Category::Other);
//! ```

use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grocery store department
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Produce,
    Dairy,
    #[serde(rename = "Meat & Seafood")]
    MeatAndSeafood,
    Pantry,
    Frozen,
    Beverages,
    #[serde(rename = "Snacks & Sweets")]
    SnacksAndSweets,
    Household,
    Other,
}

impl Category {
    /// Display label, also used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Produce => "Produce",
            Category::Dairy => "Dairy",
            Category::MeatAndSeafood => "Meat & Seafood",
            Category::Pantry => "Pantry",
            Category::Frozen => "Frozen",
            Category::Beverages => "Beverages",
            Category::SnacksAndSweets => "Snacks & Sweets",
            Category::Household => "Household",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Keyword table in priority order. `Other` is the fallback and has no entry.
pub static CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Produce,
        &[
            "onion", "garlic", "tomato", "potato", "carrot", "cucumber", "lettuce", "spinach",
            "cabbage", "cauliflower", "broccoli", "eggplant", "aubergine", "brinjal", "zucchini",
            "courgette", "okra", "bhindi", "bell pepper", "capsicum", "green chili",
            "green chilli", "ginger", "coriander", "cilantro", "parsley", "mint", "dill",
            "basil", "curry leaves", "fenugreek leaves", "methi", "lemon", "lime", "apple",
            "banana", "orange", "mango", "grape", "pomegranate", "avocado", "mushroom",
            "celery", "leek", "radish", "beetroot", "pumpkin", "squash", "green peas",
            "green beans", "scallion", "melon", "berries", "strawberr", "fruit", "vegetable",
            "salad",
        ],
    ),
    (
        Category::Dairy,
        &[
            "milk", "cheese", "yogurt", "yoghurt", "labneh", "paneer", "cream", "butter",
            "ghee", "egg", "curd", "halloumi", "feta", "dahi",
        ],
    ),
    (
        Category::MeatAndSeafood,
        &[
            "chicken", "beef", "lamb", "mutton", "goat", "pork", "bacon", "sausage", "turkey",
            "duck", "veal", "steak", "mince", "keema", "meat", "fish", "salmon", "tuna",
            "cod", "tilapia", "sardine", "anchov", "shrimp", "prawn", "crab", "lobster",
            "squid", "mussel",
        ],
    ),
    (Category::Frozen, &["frozen"]),
    (
        Category::Pantry,
        &[
            "rice", "flour", "atta", "maida", "sugar", "salt", "pepper", "oil", "vinegar",
            "pasta", "spaghetti", "noodle", "lentil", "dal", "chickpea", "bean", "oats",
            "semolina", "bulgur", "couscous", "quinoa", "bread", "pita", "tortilla", "cumin",
            "turmeric", "paprika", "chili powder", "chilli powder", "cinnamon", "cardamom",
            "clove", "saffron", "masala", "sumac", "za'atar", "zaatar", "spice", "seasoning",
            "honey", "tahini", "sauce", "ketchup", "mayonnaise", "mustard", "paste", "stock",
            "broth", "yeast", "baking", "vanilla", "cornstarch", "coconut",
        ],
    ),
    (
        Category::Beverages,
        &[
            "juice", "water", "coffee", "tea", "soda", "drink", "lassi", "laban",
        ],
    ),
    (
        Category::SnacksAndSweets,
        &[
            "chocolate", "candy", "cookie", "biscuit", "chips", "crisps", "cracker", "cake",
            "dessert", "almond", "cashew", "pistachio", "walnut", "peanut", "raisin", "dates",
            "jam", "halwa", "popcorn",
        ],
    ),
    (
        Category::Household,
        &[
            "paper towel", "toilet paper", "tissue", "napkin", "foil", "cling film",
            "plastic wrap", "trash bag", "bin bag", "soap", "detergent", "dish", "sponge",
            "bleach",
        ],
    ),
];

/// Category ordering that follows a typical walk through the store
static SUGGESTED_SHOPPING_ORDER: &[Category] = &[
    Category::Produce,
    Category::MeatAndSeafood,
    Category::Dairy,
    Category::Pantry,
    Category::SnacksAndSweets,
    Category::Beverages,
    Category::Frozen,
    Category::Household,
    Category::Other,
];

/// Classify an ingredient name into a grocery category
///
/// Case-insensitive substring matching against [`CATEGORY_KEYWORDS`], first match wins.
/// Names with no matching keyword are [`Category::Other`].
pub fn categorize_ingredient(name: &str) -> Category {
    let lowered = name.to_lowercase();

    for (category, keywords) in CATEGORY_KEYWORDS {
        if let Some(keyword) = keywords.iter().find(|keyword| lowered.contains(*keyword)) {
            trace!("Categorized '{}' as {} via '{}'", name, category, keyword);
            return *category;
        }
    }

    trace!("No category keyword matched '{}'", name);
    Category::Other
}

/// Fixed category ordering for displaying a shopping list
pub fn suggested_shopping_order() -> &'static [Category] {
    SUGGESTED_SHOPPING_ORDER
}

/// [`suggested_shopping_order`] as display labels
pub fn suggested_shopping_order_labels() -> Vec<&'static str> {
    SUGGESTED_SHOPPING_ORDER.iter().map(Category::as_str).collect()
}
