//! # Measurement Patterns Module
//!
//! This module contains the regex patterns used to split an ingredient line into
//! quantity, unit and name, plus the helpers used to clean the name afterwards.

use crate::measurement_types::known_unit_tokens;
use lazy_static::lazy_static;
use regex::Regex;

/// A quantity token: range ("2-3", "1 to 2"), mixed number ("1 1/2"), fraction ("1/2") or decimal
pub const QUANTITY_PATTERN: &str =
    r"\d+(?:\.\d+)?\s*(?:-|–|to)\s*\d+(?:\.\d+)?|\d+\s+\d+/\d+|\d+/\d+|\d+(?:\.\d+)?";

/// Size words that sit where a unit would ("3 large eggs")
pub const SIZE_DESCRIPTOR_PATTERN: &str = r"extra[\s-]large|large|medium|small|whole|big";

/// Preparation words dropped from ingredient names
pub const PREPARATION_DESCRIPTORS: &[&str] = &[
    "chopped", "diced", "minced", "sliced", "grated", "fresh", "dried", "cooked", "raw",
    "boneless", "skinless",
];

/// Build a regex alternation of every known unit token, longest first
fn unit_alternation() -> String {
    let mut tokens = known_unit_tokens();
    tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    tokens
        .iter()
        .map(|token| regex::escape(token))
        .collect::<Vec<_>>()
        .join("|")
}

lazy_static! {
    /// "2 cups flour", "2-3 cloves garlic", "1 cup"
    pub static ref UNIT_TOKEN_LINE: Regex = Regex::new(&format!(
        r"(?i)^(?P<qty>{QUANTITY_PATTERN})\s+(?P<unit>{})\.?(?:\s+(?P<name>.+))?$",
        unit_alternation()
    ))
    .expect("Unit token line pattern should be valid");

    /// "200g chicken breast", "500ml"
    pub static ref GLUED_UNIT_LINE: Regex = Regex::new(&format!(
        r"(?i)^(?P<qty>{QUANTITY_PATTERN})(?P<unit>{})\.?(?:\s+(?P<name>.+))?$",
        unit_alternation()
    ))
    .expect("Glued unit line pattern should be valid");

    /// "3 large eggs", "2 large cans tomatoes"
    pub static ref SIZE_DESCRIPTOR_LINE: Regex = Regex::new(&format!(
        r"(?i)^(?P<qty>{QUANTITY_PATTERN})\s+(?P<descriptor>{SIZE_DESCRIPTOR_PATTERN})\s+(?:(?P<unit>{})\.?\s+)?(?P<name>.+)$",
        unit_alternation()
    ))
    .expect("Size descriptor line pattern should be valid");

    /// "2 onions"
    pub static ref BARE_QUANTITY_LINE: Regex = Regex::new(&format!(
        r"(?i)^(?P<qty>{QUANTITY_PATTERN})\s+(?P<name>.+)$"
    ))
    .expect("Bare quantity line pattern should be valid");

    pub static ref RANGE_QUANTITY: Regex =
        Regex::new(r"(?i)^(\d+(?:\.\d+)?)\s*(?:-|–|to)\s*(\d+(?:\.\d+)?)$")
            .expect("Range quantity pattern should be valid");

    pub static ref MIXED_QUANTITY: Regex = Regex::new(r"^(\d+)\s+(\d+)/(\d+)$")
        .expect("Mixed number pattern should be valid");

    pub static ref FRACTION_QUANTITY: Regex =
        Regex::new(r"^(\d+)/(\d+)$").expect("Fraction pattern should be valid");

    /// "salt to taste", "pepper, to taste"
    pub static ref TO_TASTE: Regex =
        Regex::new(r"(?i)[,;]?\s*\bto\s+taste\b").expect("To taste pattern should be valid");

    pub static ref PREPARATION_WORDS: Regex = Regex::new(&format!(
        r"(?i)(?:^|[\s,]+)(?:{})\b",
        PREPARATION_DESCRIPTORS.join("|")
    ))
    .expect("Preparation descriptor pattern should be valid");

    pub static ref PARENTHETICAL: Regex =
        Regex::new(r"\([^)]*\)").expect("Parenthetical pattern should be valid");

    pub static ref LEADING_OF: Regex =
        Regex::new(r"(?i)^of\s+").expect("Leading 'of' pattern should be valid");
}

/// Unicode vulgar fractions and their ASCII spelling
pub const VULGAR_FRACTIONS: &[(char, &str)] = &[
    ('½', "1/2"),
    ('⅓', "1/3"),
    ('⅔', "2/3"),
    ('¼', "1/4"),
    ('¾', "3/4"),
    ('⅛', "1/8"),
    ('⅜', "3/8"),
    ('⅝', "5/8"),
    ('⅞', "7/8"),
];
