//! # Measurement Types Module
//!
//! This module defines the unit vocabulary used by parsed ingredients and the
//! synonym table that folds the many ways recipes spell a unit into one token.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// A normalized measurement unit
///
/// Known units collapse to a fixed vocabulary (`cup`, `tbsp`, `g`, ...).
/// Anything else is kept verbatim (lower-cased) in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    Cup,
    Tablespoon,
    Teaspoon,
    Gram,
    Kilogram,
    Milliliter,
    Liter,
    Ounce,
    Pound,
    Piece,
    Can,
    Packet,
    Slice,
    Clove,
    ToTaste,
    /// Unit not in the normalization table, kept as written
    Other(String),
}

/// Spellings that normalize to a vocabulary unit
static UNIT_SYNONYMS: LazyLock<HashMap<&'static str, Unit>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Volume units
    map.insert("cup", Unit::Cup);
    map.insert("cups", Unit::Cup);
    map.insert("tbsp", Unit::Tablespoon);
    map.insert("tbsps", Unit::Tablespoon);
    map.insert("tbs", Unit::Tablespoon);
    map.insert("tablespoon", Unit::Tablespoon);
    map.insert("tablespoons", Unit::Tablespoon);
    map.insert("tsp", Unit::Teaspoon);
    map.insert("tsps", Unit::Teaspoon);
    map.insert("teaspoon", Unit::Teaspoon);
    map.insert("teaspoons", Unit::Teaspoon);
    map.insert("ml", Unit::Milliliter);
    map.insert("mls", Unit::Milliliter);
    map.insert("milliliter", Unit::Milliliter);
    map.insert("milliliters", Unit::Milliliter);
    map.insert("millilitre", Unit::Milliliter);
    map.insert("millilitres", Unit::Milliliter);
    map.insert("l", Unit::Liter);
    map.insert("liter", Unit::Liter);
    map.insert("liters", Unit::Liter);
    map.insert("litre", Unit::Liter);
    map.insert("litres", Unit::Liter);

    // Weight units
    map.insert("g", Unit::Gram);
    map.insert("gm", Unit::Gram);
    map.insert("gms", Unit::Gram);
    map.insert("gram", Unit::Gram);
    map.insert("grams", Unit::Gram);
    map.insert("gramme", Unit::Gram);
    map.insert("grammes", Unit::Gram);
    map.insert("kg", Unit::Kilogram);
    map.insert("kgs", Unit::Kilogram);
    map.insert("kilogram", Unit::Kilogram);
    map.insert("kilograms", Unit::Kilogram);
    map.insert("oz", Unit::Ounce);
    map.insert("ounce", Unit::Ounce);
    map.insert("ounces", Unit::Ounce);
    map.insert("lb", Unit::Pound);
    map.insert("lbs", Unit::Pound);
    map.insert("pound", Unit::Pound);
    map.insert("pounds", Unit::Pound);

    // Count units
    map.insert("piece", Unit::Piece);
    map.insert("pieces", Unit::Piece);
    map.insert("pc", Unit::Piece);
    map.insert("pcs", Unit::Piece);
    map.insert("can", Unit::Can);
    map.insert("cans", Unit::Can);
    map.insert("tin", Unit::Can);
    map.insert("tins", Unit::Can);
    map.insert("packet", Unit::Packet);
    map.insert("packets", Unit::Packet);
    map.insert("pack", Unit::Packet);
    map.insert("packs", Unit::Packet);
    map.insert("package", Unit::Packet);
    map.insert("packages", Unit::Packet);
    map.insert("pkt", Unit::Packet);
    map.insert("slice", Unit::Slice);
    map.insert("slices", Unit::Slice);
    map.insert("clove", Unit::Clove);
    map.insert("cloves", Unit::Clove);

    map.insert("to taste", Unit::ToTaste);

    map
});

/// Units the parser recognizes as a unit token but does not normalize
pub const PASS_THROUGH_UNITS: &[&str] = &[
    "pinch", "pinches", "dash", "dashes", "bunch", "bunches", "handful", "handfuls", "sprig",
    "sprigs", "stick", "sticks", "bottle", "bottles", "jar", "jars", "bag", "bags", "box",
    "boxes", "head", "heads", "drop", "drops",
];

/// Every spelling the parser should accept as a unit token
pub fn known_unit_tokens() -> Vec<&'static str> {
    UNIT_SYNONYMS
        .keys()
        .copied()
        .filter(|token| *token != "to taste")
        .chain(PASS_THROUGH_UNITS.iter().copied())
        .collect()
}

/// Normalize a unit token through the synonym table
///
/// Matching is case-insensitive and ignores a trailing abbreviation dot
/// (`"Tbsp."` -> `tbsp`). Unknown tokens pass through lower-cased.
pub fn normalize_unit(token: &str) -> Unit {
    let lowered = token.trim().trim_end_matches('.').to_lowercase();

    match UNIT_SYNONYMS.get(lowered.as_str()) {
        Some(unit) => unit.clone(),
        None => Unit::Other(lowered),
    }
}

impl Unit {
    /// The normalized token for this unit
    pub fn as_str(&self) -> &str {
        match self {
            Unit::Cup => "cup",
            Unit::Tablespoon => "tbsp",
            Unit::Teaspoon => "tsp",
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Milliliter => "ml",
            Unit::Liter => "l",
            Unit::Ounce => "oz",
            Unit::Pound => "lb",
            Unit::Piece => "piece",
            Unit::Can => "can",
            Unit::Packet => "packet",
            Unit::Slice => "slice",
            Unit::Clove => "clove",
            Unit::ToTaste => "to taste",
            Unit::Other(raw) => raw,
        }
    }

    /// Check if this unit is part of the normalized vocabulary
    pub fn is_normalized(&self) -> bool {
        !matches!(self, Unit::Other(_))
    }
}

impl From<String> for Unit {
    fn from(value: String) -> Self {
        normalize_unit(&value)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.as_str().to_string()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
