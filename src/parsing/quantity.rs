use super::collapse_whitespace;
use crate::model::Ingredient;

/// Recognized unit tokens, longest first so that multi-word units win over
/// their abbreviations ("cuillère à soupe" before "c", "ml" before "l").
/// Matching is case-insensitive and requires a word boundary after the token,
/// so "l" never eats the front of "lait".
const UNIT_TOKENS: &[&str] = &[
    "cuillères à soupe",
    "cuillère à soupe",
    "cuillères à café",
    "cuillère à café",
    "tablespoons",
    "tablespoon",
    "kilogrammes",
    "kilogramme",
    "millilitres",
    "milliliters",
    "centilitres",
    "kilograms",
    "teaspoons",
    "kilogram",
    "teaspoon",
    "grammes",
    "tranches",
    "tranche",
    "pincées",
    "sachets",
    "gousses",
    "gramme",
    "pincée",
    "pinches",
    "sachet",
    "gousse",
    "litres",
    "liters",
    "slices",
    "sprigs",
    "tasses",
    "verres",
    "cloves",
    "brins",
    "grams",
    "litre",
    "liter",
    "pinch",
    "slice",
    "sprig",
    "tasse",
    "verre",
    "clove",
    "c.à.s",
    "c.à.c",
    "gram",
    "cups",
    "brin",
    "tbsp",
    "cas",
    "cac",
    "cup",
    "tsp",
    "kg",
    "mg",
    "ml",
    "cl",
    "dl",
    "oz",
    "lb",
    "g",
    "l",
];

/// Connector words between a quantity/unit and the ingredient name
/// ("200 g de farine", "2 cups of flour").
const CONNECTORS: &[&str] = &["de", "of"];

/// Tokenizes a free-text ingredient line into name, quantity and unit.
///
/// Tried in priority order:
/// 1. `<number> <unit> [de|of] <name>` with the unit matched against
///    [`UNIT_TOKENS`]
/// 2. `<number> <name>` with no recognized unit
/// 3. the whole line as a name, without quantity
///
/// Empty input yields an ingredient with an empty name; that is a valid
/// result, not an error.
pub fn parse_ingredient_line(line: &str) -> Ingredient {
    let text = collapse_whitespace(line);
    if text.is_empty() {
        return Ingredient::named("");
    }

    let Some((quantity, rest)) = split_leading_number(&text) else {
        return Ingredient::named(text);
    };
    let rest = rest.trim_start();

    if let Some((unit, after_unit)) = match_unit(rest) {
        return Ingredient {
            name: strip_connector(after_unit).to_string(),
            quantity: Some(quantity),
            unit,
        };
    }

    Ingredient {
        name: strip_connector(rest).to_string(),
        quantity: Some(quantity),
        unit: String::new(),
    }
}

/// Parses a leading decimal number, accepting both "1.5" and "1,5".
/// Returns the value and the remainder of the line.
fn split_leading_number(text: &str) -> Option<(f64, &str)> {
    let mut end = 0;
    let mut chars = text.char_indices().peekable();

    while let Some(&(i, c)) = chars.peek() {
        if c.is_ascii_digit() {
            end = i + c.len_utf8();
            chars.next();
        } else if (c == '.' || c == ',') && end > 0 {
            // Separator counts only when followed by more digits
            let mut ahead = chars.clone();
            ahead.next();
            match ahead.peek() {
                Some(&(_, d)) if d.is_ascii_digit() => {
                    end = i + c.len_utf8();
                    chars.next();
                }
                _ => break,
            }
        } else {
            break;
        }
    }

    if end == 0 {
        return None;
    }
    let number = text[..end].replace(',', ".");
    number.parse::<f64>().ok().map(|value| (value, &text[end..]))
}

/// Matches a unit token at the start of `rest`, returning the canonical
/// (lowercased) token and the remainder after it.
fn match_unit(rest: &str) -> Option<(String, &str)> {
    for token in UNIT_TOKENS {
        if let Some(after) = strip_prefix_ignore_case(rest, token) {
            // Word boundary: end of line or whitespace after the token
            if after.is_empty() || after.starts_with(char::is_whitespace) {
                return Some((token.to_string(), after.trim_start()));
            }
        }
    }
    None
}

/// Drops a leading "de"/"of"/"d'" connector from the ingredient name.
fn strip_connector(name: &str) -> &str {
    for connector in CONNECTORS {
        if let Some(after) = strip_prefix_ignore_case(name, connector) {
            if after.is_empty() {
                return "";
            }
            if after.starts_with(char::is_whitespace) {
                return after.trim_start();
            }
        }
    }
    for apostrophe in ["d'", "d’"] {
        if let Some(after) = strip_prefix_ignore_case(name, apostrophe) {
            return after.trim_start();
        }
    }
    name.trim()
}

/// Case-insensitive prefix strip that walks `text` char by char, so the
/// returned slice always sits on a boundary of the original string. `token`
/// must be lowercase already; a char whose lowercase form expands to several
/// chars ("İ") simply fails to match.
fn strip_prefix_ignore_case<'a>(text: &'a str, token: &str) -> Option<&'a str> {
    let mut chars = text.chars();
    for expected in token.chars() {
        let mut lower = chars.next()?.to_lowercase();
        if lower.next() != Some(expected) || lower.next().is_some() {
            return None;
        }
    }
    Some(chars.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_unit_and_name() {
        let ing = parse_ingredient_line("200 g de farine");
        assert_eq!(ing.name, "farine");
        assert_eq!(ing.quantity, Some(200.0));
        assert_eq!(ing.unit, "g");
    }

    #[test]
    fn test_quantity_without_unit() {
        let ing = parse_ingredient_line("2 oeufs");
        assert_eq!(ing.name, "oeufs");
        assert_eq!(ing.quantity, Some(2.0));
        assert_eq!(ing.unit, "");
    }

    #[test]
    fn test_comma_decimal_separator() {
        let ing = parse_ingredient_line("1,5 l de lait");
        assert_eq!(ing.name, "lait");
        assert_eq!(ing.quantity, Some(1.5));
        assert_eq!(ing.unit, "l");
    }

    #[test]
    fn test_multi_word_unit() {
        let ing = parse_ingredient_line("2 cuillères à soupe d'huile d'olive");
        assert_eq!(ing.name, "huile d'olive");
        assert_eq!(ing.quantity, Some(2.0));
        assert_eq!(ing.unit, "cuillères à soupe");
    }

    #[test]
    fn test_unit_is_not_matched_inside_word() {
        // "l" must not be taken as litres at the front of "laitue"
        let ing = parse_ingredient_line("1 laitue");
        assert_eq!(ing.name, "laitue");
        assert_eq!(ing.quantity, Some(1.0));
        assert_eq!(ing.unit, "");
    }

    #[test]
    fn test_unit_matching_is_case_insensitive() {
        let ing = parse_ingredient_line("2 CL d'eau");
        assert_eq!(ing.name, "eau");
        assert_eq!(ing.quantity, Some(2.0));
        assert_eq!(ing.unit, "cl");
    }

    #[test]
    fn test_multibyte_lowercasing_does_not_break_names() {
        // 'İ' grows from two to three bytes when lowercased
        let ing = parse_ingredient_line("1 d'İİİstanbul");
        assert_eq!(ing.name, "İİİstanbul");
        assert_eq!(ing.quantity, Some(1.0));
        assert_eq!(ing.unit, "");
    }

    #[test]
    fn test_no_number_keeps_whole_line() {
        let ing = parse_ingredient_line("sel et poivre");
        assert_eq!(ing.name, "sel et poivre");
        assert_eq!(ing.quantity, None);
        assert_eq!(ing.unit, "");
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        let ing = parse_ingredient_line("  3   gousses  \n d'ail ");
        assert_eq!(ing.name, "ail");
        assert_eq!(ing.quantity, Some(3.0));
        assert_eq!(ing.unit, "gousses");
    }

    #[test]
    fn test_english_line() {
        let ing = parse_ingredient_line("2 cups of flour");
        assert_eq!(ing.name, "flour");
        assert_eq!(ing.quantity, Some(2.0));
        assert_eq!(ing.unit, "cups");
    }

    #[test]
    fn test_empty_input_is_valid() {
        let ing = parse_ingredient_line("   ");
        assert_eq!(ing.name, "");
        assert_eq!(ing.quantity, None);
        assert_eq!(ing.unit, "");
    }
}
