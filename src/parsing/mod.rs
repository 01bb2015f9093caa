//! Free-text normalizers shared by every extraction strategy.
//!
//! These parsers never fail: unparseable input degrades to a default
//! (empty ingredient, zero minutes, four portions) and the caller decides
//! what to do with it.

mod duration;
mod portions;
mod quantity;

pub use duration::parse_minutes;
pub use portions::parse_portions;
pub use quantity::parse_ingredient_line;

/// Collapses runs of whitespace (spaces, tabs, newlines) into single spaces.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
