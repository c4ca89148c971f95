//! # Ingredient Parser
//!
//! This module turns one free-text ingredient line into a structured
//! [`ParsedIngredient`]. Parsing never fails: anything that cannot be read is given
//! a conservative default (quantity 1, unit `piece`, the cleaned line as name).
//!
//! ## Features
//!
//! - Explicit units ("2 cups flour") and units glued to the number ("200g chicken")
//! - Fractions ("1/2"), mixed numbers ("1 1/2") and unicode fractions ("1½")
//! - Ranges ("2-3", "1 to 2"), resolved to their mean
//! - Size words in place of a unit ("3 large eggs") and bare counts ("2 onions")
//! - "to taste" lines, which skip quantity parsing entirely
//! - Name cleanup: preparation words, parenthetical notes and stray punctuation
//!
//! ## Usage
//!
//! ```rust
//! use shopping_list::ingredient_parser::parse_ingredient;
//!
//! let parsed = parse_ingredient("2-3 cloves garlic, minced");
//! assert_eq!(parsed.name, "garlic");
//! assert_eq!(parsed.quantity, 2.5);
//! assert_eq!(parsed.unit.as_str(), "clove");
//! ```

use crate::ingredient_model::ParsedIngredient;
use crate::measurement_patterns::{
    BARE_QUANTITY_LINE, FRACTION_QUANTITY, GLUED_UNIT_LINE, LEADING_OF, MIXED_QUANTITY,
    PARENTHETICAL, PREPARATION_WORDS, RANGE_QUANTITY, SIZE_DESCRIPTOR_LINE, TO_TASTE,
    UNIT_TOKEN_LINE, VULGAR_FRACTIONS,
};
use crate::measurement_types::{normalize_unit, Unit};
use log::{debug, trace};
use regex::Regex;

/// Quantity used whenever none can be read
pub const DEFAULT_QUANTITY: f64 = 1.0;

/// Pieces of a line picked out by one of the line matchers
#[derive(Debug, Clone, PartialEq)]
struct LineMatch<'a> {
    quantity: &'a str,
    unit: Unit,
    name: &'a str,
}

type LineMatcher = for<'a> fn(&'a str) -> Option<LineMatch<'a>>;

/// Line shapes in priority order; the first one that matches wins
const LINE_MATCHERS: &[(&str, LineMatcher)] = &[
    ("unit token", match_unit_token),
    ("glued unit", match_glued_unit),
    ("size descriptor", match_size_descriptor),
    ("bare quantity", match_bare_quantity),
];

/// Parse a single ingredient line
pub fn parse_ingredient(line: &str) -> ParsedIngredient {
    let line = normalize_line(line);

    if TO_TASTE.is_match(&line) {
        return parse_to_taste(&line);
    }

    for (shape, matcher) in LINE_MATCHERS {
        if let Some(found) = matcher(&line) {
            let quantity = quantity_or_default(found.quantity);
            let name = clean_ingredient_name(found.name);
            trace!(
                "Matched '{}' as {}: quantity={}, unit={}, name='{}'",
                line,
                shape,
                quantity,
                found.unit,
                name
            );
            return ParsedIngredient::new(&name, quantity, found.unit);
        }
    }

    debug!("No quantity found in '{}', using defaults", line);
    ParsedIngredient::new(&clean_ingredient_name(&line), DEFAULT_QUANTITY, Unit::Piece)
}

/// Convert a quantity token to a decimal
///
/// Accepts ranges ("2-3", "1 to 2", resolved to their mean), mixed numbers
/// ("1 1/2"), fractions ("3/4") and decimals ("2.5"). The result is always
/// finite and greater than zero.
pub fn parse_quantity(token: &str) -> Result<f64, ParseError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ParseError::EmptyQuantity);
    }

    let value = if let Some(captures) = RANGE_QUANTITY.captures(token) {
        let min = parse_number(&captures[1])?;
        let max = parse_number(&captures[2])?;
        (min + max) / 2.0
    } else if let Some(captures) = MIXED_QUANTITY.captures(token) {
        parse_number(&captures[1])? + parse_fraction(&captures[2], &captures[3])?
    } else if let Some(captures) = FRACTION_QUANTITY.captures(token) {
        parse_fraction(&captures[1], &captures[2])?
    } else {
        parse_number(token)?
    };

    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ParseError::NotPositive(token.to_string()))
    }
}

/// Clean an extracted ingredient name
///
/// Drops parenthetical notes, preparation words (chopped, fresh, boneless, ...),
/// a leading "of" and surrounding punctuation, and collapses whitespace.
pub fn clean_ingredient_name(raw: &str) -> String {
    let without_notes = PARENTHETICAL.replace_all(raw, " ");
    let without_descriptors = PREPARATION_WORDS.replace_all(&without_notes, " ");
    let cleaned = trim_name(&without_descriptors);
    let cleaned = trim_name(&LEADING_OF.replace(&cleaned, ""));

    if cleaned.is_empty() {
        // Only descriptors were left; keep them rather than returning nothing
        return trim_name(raw);
    }

    trace!("Cleaned ingredient name: '{}' -> '{}'", raw, cleaned);
    cleaned
}

fn trim_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | ';' | ':' | '-' | '*'))
        .to_string()
}

/// Rewrite unicode fractions to ASCII and collapse whitespace
fn normalize_line(line: &str) -> String {
    let mut normalized = line.to_string();
    for (glyph, ascii) in VULGAR_FRACTIONS {
        if normalized.contains(*glyph) {
            normalized = normalized.replace(*glyph, &format!(" {} ", ascii));
        }
    }
    normalized.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// "salt to taste": quantity 1, unit "to taste", name without the suffix
fn parse_to_taste(line: &str) -> ParsedIngredient {
    let remainder = TO_TASTE.replace_all(line, " ");
    let remainder = remainder.trim();

    // "1 tsp salt, to taste" keeps only the name part; its amount is not used
    let name = LINE_MATCHERS
        .iter()
        .find_map(|(_, matcher)| matcher(remainder))
        .map(|found| clean_ingredient_name(found.name))
        .unwrap_or_else(|| clean_ingredient_name(remainder));

    trace!("Parsed to-taste line '{}' as '{}'", line, name);
    ParsedIngredient::new(&name, DEFAULT_QUANTITY, Unit::ToTaste)
}

fn quantity_or_default(token: &str) -> f64 {
    parse_quantity(token).unwrap_or_else(|e| {
        debug!("Unusable quantity '{}' ({}), defaulting to {}", token, e, DEFAULT_QUANTITY);
        DEFAULT_QUANTITY
    })
}

fn parse_number(text: &str) -> Result<f64, ParseError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber(text.to_string()))
}

fn parse_fraction(numerator: &str, denominator: &str) -> Result<f64, ParseError> {
    let numerator = parse_number(numerator)?;
    let denominator = parse_number(denominator)?;
    if denominator == 0.0 {
        return Err(ParseError::DivisionByZero);
    }
    Ok(numerator / denominator)
}

/// Pull quantity, unit and name out of a line shape
///
/// A shape without a `unit` group, or whose optional unit did not match, gets
/// `default_unit`. A line that stops right after its unit ("1 cup") has an empty name.
fn capture_line<'a>(
    pattern: &Regex,
    line: &'a str,
    default_unit: Option<Unit>,
) -> Option<LineMatch<'a>> {
    let captures = pattern.captures(line)?;
    let unit = match captures.name("unit") {
        Some(token) => normalize_unit(token.as_str()),
        None => default_unit?,
    };

    Some(LineMatch {
        quantity: captures.name("qty")?.as_str(),
        unit,
        name: captures.name("name").map_or("", |name| name.as_str()),
    })
}

fn match_unit_token(line: &str) -> Option<LineMatch<'_>> {
    capture_line(&UNIT_TOKEN_LINE, line, None)
}

fn match_glued_unit(line: &str) -> Option<LineMatch<'_>> {
    capture_line(&GLUED_UNIT_LINE, line, None)
}

fn match_size_descriptor(line: &str) -> Option<LineMatch<'_>> {
    capture_line(&SIZE_DESCRIPTOR_LINE, line, Some(Unit::Piece))
}

fn match_bare_quantity(line: &str) -> Option<LineMatch<'_>> {
    capture_line(&BARE_QUANTITY_LINE, line, Some(Unit::Piece))
}

/// Errors that can occur while converting a quantity token
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    EmptyQuantity,
    InvalidNumber(String),
    DivisionByZero,
    NotPositive(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyQuantity => write!(f, "Empty quantity"),
            ParseError::InvalidNumber(text) => write!(f, "Invalid number format: {}", text),
            ParseError::DivisionByZero => write!(f, "Division by zero in fraction"),
            ParseError::NotPositive(text) => write!(f, "Quantity is not positive: {}", text),
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient_categorizer::Category;

    #[test]
    fn test_parse_simple_ingredient() {
        let result = parse_ingredient("2 cups flour");
        assert_eq!(result.name, "flour");
        assert_eq!(result.quantity, 2.0);
        assert_eq!(result.unit, Unit::Cup);
        assert_eq!(result.category, Category::Pantry);
    }

    #[test]
    fn test_parse_fraction_ingredient() {
        let result = parse_ingredient("1/2 cup olive oil");
        assert_eq!(
            result,
            ParsedIngredient {
                name: "olive oil".to_string(),
                quantity: 0.5,
                unit: Unit::Cup,
                category: Category::Pantry,
            }
        );
    }

    #[test]
    fn test_parse_mixed_number() {
        assert_eq!(parse_ingredient("1 1/2 cups flour").quantity, 1.5);
        assert_eq!(parse_ingredient("2 1/2 cups olive oil").quantity, 2.5);
    }

    #[test]
    fn test_parse_unicode_fraction() {
        let result = parse_ingredient("1½ cups milk");
        assert_eq!(result.quantity, 1.5);
        assert_eq!(result.unit, Unit::Cup);
        assert_eq!(result.name, "milk");

        assert_eq!(parse_ingredient("¾ tsp salt").quantity, 0.75);
    }

    #[test]
    fn test_parse_range_ingredient() {
        let result = parse_ingredient("2-3 cloves garlic");
        assert_eq!(result.quantity, 2.5);
        assert_eq!(result.unit, Unit::Clove);
        assert_eq!(result.name, "garlic");

        assert_eq!(parse_ingredient("1 to 2 tbsp honey").quantity, 1.5);
    }

    #[test]
    fn test_parse_unit_glued_to_number() {
        let result = parse_ingredient("200g chicken breast");
        assert_eq!(
            result,
            ParsedIngredient {
                name: "chicken breast".to_string(),
                quantity: 200.0,
                unit: Unit::Gram,
                category: Category::MeatAndSeafood,
            }
        );
    }

    #[test]
    fn test_parse_size_descriptor() {
        let result = parse_ingredient("3 large eggs");
        assert_eq!(result.quantity, 3.0);
        assert_eq!(result.unit, Unit::Piece);
        assert_eq!(result.name, "eggs");
        assert_eq!(result.category, Category::Dairy);
    }

    #[test]
    fn test_unit_only_line_keeps_its_unit() {
        let result = parse_ingredient("1 cup");
        assert_eq!(result.quantity, 1.0);
        assert_eq!(result.unit, Unit::Cup);
        assert_eq!(result.name, "");
        assert_eq!(result.category, Category::Other);

        let result = parse_ingredient("500ml");
        assert_eq!(result.quantity, 500.0);
        assert_eq!(result.unit, Unit::Milliliter);
        assert_eq!(result.name, "");
    }

    #[test]
    fn test_size_descriptor_followed_by_unit() {
        let result = parse_ingredient("2 large cans tomatoes");
        assert_eq!(result.quantity, 2.0);
        assert_eq!(result.unit, Unit::Can);
        assert_eq!(result.name, "tomatoes");
        assert_eq!(result.category, Category::Produce);

        let result = parse_ingredient("1 small bunch fresh parsley");
        assert_eq!(result.unit, Unit::Other("bunch".to_string()));
        assert_eq!(result.name, "parsley");
    }

    #[test]
    fn test_parse_bare_quantity() {
        let result = parse_ingredient("2 onions");
        assert_eq!(result.quantity, 2.0);
        assert_eq!(result.unit, Unit::Piece);
        assert_eq!(result.name, "onions");
    }

    #[test]
    fn test_parse_to_taste() {
        assert_eq!(
            parse_ingredient("salt to taste"),
            ParsedIngredient {
                name: "salt".to_string(),
                quantity: 1.0,
                unit: Unit::ToTaste,
                category: Category::Pantry,
            }
        );
    }

    #[test]
    fn test_to_taste_skips_quantity_parsing() {
        let result = parse_ingredient("1 tsp black pepper, to taste");
        assert_eq!(result.quantity, 1.0);
        assert_eq!(result.unit, Unit::ToTaste);
        assert_eq!(result.name, "black pepper");

        let result = parse_ingredient("3 pinches Salt To Taste");
        assert_eq!(result.quantity, 1.0);
        assert_eq!(result.unit, Unit::ToTaste);
    }

    #[test]
    fn test_descriptor_stripping() {
        assert_eq!(parse_ingredient("2 cups onions, chopped").name, "onions");
        assert_eq!(parse_ingredient("1 bunch fresh coriander").name, "coriander");
        assert_eq!(
            parse_ingredient("500g boneless skinless chicken thighs").name,
            "chicken thighs"
        );
        assert_eq!(parse_ingredient("2 cups of flour").name, "flour");
        assert_eq!(parse_ingredient("1 can chickpeas (drained).").name, "chickpeas");
    }

    #[test]
    fn test_descriptor_inside_word_is_kept() {
        assert_eq!(parse_ingredient("1 cup strawberries").name, "strawberries");
        assert_eq!(parse_ingredient("100g sun-dried tomatoes").name, "sun-dried tomatoes");
    }

    #[test]
    fn test_no_quantity_falls_back() {
        let result = parse_ingredient("a handful of parsley");
        assert_eq!(result.quantity, 1.0);
        assert_eq!(result.unit, Unit::Piece);
        assert_eq!(result.name, "a handful of parsley");
    }

    #[test]
    fn test_empty_input_falls_back() {
        for line in ["", "   ", "\t\n"] {
            let result = parse_ingredient(line);
            assert_eq!(result.quantity, 1.0);
            assert_eq!(result.unit, Unit::Piece);
            assert_eq!(result.name, "");
            assert_eq!(result.category, Category::Other);
        }
    }

    #[test]
    fn test_unit_normalization_and_pass_through() {
        assert_eq!(parse_ingredient("2 Tablespoons sugar").unit, Unit::Tablespoon);
        assert_eq!(parse_ingredient("1 Tbsp. butter").unit, Unit::Tablespoon);
        assert_eq!(parse_ingredient("2 packets yeast").unit, Unit::Packet);
        assert_eq!(
            parse_ingredient("2 Pinches saffron").unit,
            Unit::Other("pinches".to_string())
        );
    }

    #[test]
    fn test_zero_or_broken_quantity_defaults_to_one() {
        let result = parse_ingredient("0 cups water");
        assert_eq!(result.quantity, 1.0);
        assert_eq!(result.unit, Unit::Cup);

        let result = parse_ingredient("1/0 cup sugar");
        assert_eq!(result.quantity, 1.0);
        assert_eq!(result.name, "sugar");
    }

    #[test]
    fn test_quantity_is_always_positive() {
        let lines = [
            "", "salt to taste", "0 eggs", "0/4 cup milk", "2-3 cloves garlic", "-1 cups rice",
            "just some text", "1/0 cup", "999999999999999999999 g sugar", "½",
        ];
        for line in lines {
            let parsed = parse_ingredient(line);
            assert!(parsed.quantity > 0.0, "quantity for {:?} was {}", line, parsed.quantity);
        }
    }

    #[test]
    fn test_quantity_parsing() {
        assert_eq!(parse_quantity("2.5"), Ok(2.5));
        assert_eq!(parse_quantity("1/2"), Ok(0.5));
        assert_eq!(parse_quantity("2 1/4"), Ok(2.25));
        assert_eq!(parse_quantity("2-3"), Ok(2.5));
        assert_eq!(parse_quantity("1 to 2"), Ok(1.5));
        assert_eq!(parse_quantity("1/0"), Err(ParseError::DivisionByZero));
        assert_eq!(parse_quantity(""), Err(ParseError::EmptyQuantity));
        assert_eq!(parse_quantity("0"), Err(ParseError::NotPositive("0".to_string())));
        assert!(matches!(parse_quantity("abc"), Err(ParseError::InvalidNumber(_))));
        assert!(matches!(parse_quantity("inf"), Err(ParseError::NotPositive(_))));
    }

    #[test]
    fn test_clean_ingredient_name() {
        assert_eq!(clean_ingredient_name("  onions,  chopped. "), "onions");
        assert_eq!(clean_ingredient_name("Fresh   Basil"), "Basil");
        assert_eq!(clean_ingredient_name("chopped"), "chopped");
    }
}
