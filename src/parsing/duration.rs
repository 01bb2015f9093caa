/// Normalizes a free-text duration into minutes.
///
/// Accumulates an hour group (a number followed by an "h"/"heure"/"hour"
/// marker) and a minute group (a number followed by "min"/"minute"), which are
/// additive and independent: "1h 30min" is 90, "2h" is 120, "45 min" is 45.
/// The compact French form "1h30" is also understood. ISO-8601 durations
/// ("PT1H30M") are accepted, since structured recipe markup carries them.
/// When no marker matches but the whole text is a bare integer, it is taken as
/// minutes. Anything else yields 0, never an error.
pub fn parse_minutes(text: &str) -> u32 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0;
    }

    if let Some(minutes) = parse_iso8601(trimmed) {
        return minutes;
    }

    let lower = trimmed.to_lowercase();
    let chars: Vec<char> = lower.chars().collect();
    let mut total: u32 = 0;
    let mut any_marker = false;
    let mut after_hours = false;
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            if chars[i].is_alphabetic() {
                after_hours = false;
            }
            i += 1;
            continue;
        }

        let mut value: u32 = 0;
        while i < chars.len() && chars[i].is_ascii_digit() {
            value = value
                .saturating_mul(10)
                .saturating_add(chars[i] as u32 - '0' as u32);
            i += 1;
        }

        let mut j = i;
        while j < chars.len() && chars[j].is_whitespace() {
            j += 1;
        }
        let mut word = String::new();
        let mut k = j;
        while k < chars.len() && chars[k].is_alphabetic() {
            word.push(chars[k]);
            k += 1;
        }

        if word.starts_with('h') {
            total = total.saturating_add(value.saturating_mul(60));
            any_marker = true;
            after_hours = true;
            i = k;
        } else if word.starts_with("min") {
            total = total.saturating_add(value);
            any_marker = true;
            after_hours = false;
            i = k;
        } else if word.is_empty() && after_hours {
            // Compact form: the run glued to an hour marker is minutes ("1h30")
            total = total.saturating_add(value);
            after_hours = false;
            i = j;
        } else {
            after_hours = false;
            i = k.max(j);
        }
    }

    if any_marker {
        return total;
    }
    if lower.chars().all(|c| c.is_ascii_digit()) {
        return lower.parse().unwrap_or(0);
    }
    0
}

/// Parses the `PT#H#M(#S)` textual form. Seconds are ignored; recipe timings
/// below the minute are noise.
fn parse_iso8601(text: &str) -> Option<u32> {
    let upper = text.to_uppercase();
    let body = upper.strip_prefix("PT")?;

    let mut total: u32 = 0;
    let mut value: u32 = 0;
    let mut seen_digit = false;
    for c in body.chars() {
        if c.is_ascii_digit() {
            value = value.saturating_mul(10).saturating_add(c as u32 - '0' as u32);
            seen_digit = true;
        } else {
            match c {
                'H' => total = total.saturating_add(value.saturating_mul(60)),
                'M' => total = total.saturating_add(value),
                'S' | '.' => {}
                _ => return None,
            }
            value = 0;
        }
    }
    seen_digit.then_some(total)
}
