use crate::model::{Recipe, DEFAULT_PORTIONS};

/// Extracts a serving count from free text ("Pour 6 personnes", "4 parts").
///
/// The first integer substring wins and is clamped into the allowed range;
/// when no integer is found the household default of 4 applies.
pub fn parse_portions(text: &str) -> u32 {
    let mut value: u32 = 0;
    let mut seen_digit = false;

    for c in text.chars() {
        if c.is_ascii_digit() {
            value = value.saturating_mul(10).saturating_add(c as u32 - '0' as u32);
            seen_digit = true;
        } else if seen_digit {
            break;
        }
    }

    if seen_digit {
        Recipe::clamp_portions(value)
    } else {
        DEFAULT_PORTIONS
    }
}
