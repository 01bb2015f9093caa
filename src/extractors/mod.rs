//! Extraction strategies, from authoritative structured markup down to
//! site-agnostic heuristics.
//!
//! Each strategy returns an explicit `Result`: a missing field is never an
//! error (defaults apply), but a document with nothing recognizable in it
//! yields a `ParseFailure` and control falls through to the next strategy.

mod generic;
pub mod sites;
mod structured;

pub use generic::GenericHeuristicExtractor;
pub use structured::{StructuredDataExtractor, STRUCTURED_CONFIDENCE};

use scraper::{Html, Selector};

use crate::error::ParseFailure;
use crate::model::Recipe;

/// Everything a strategy may look at for one document.
pub struct ParsingContext {
    pub url: String,
    pub host: String,
    pub document: Html,
}

impl ParsingContext {
    pub fn new(url: &str, host: &str, body: &str) -> Self {
        ParsingContext {
            url: url.to_string(),
            host: host.to_string(),
            document: Html::parse_document(body),
        }
    }
}

/// A single extraction strategy.
///
/// Implementations must not panic on adversarial input and must leave absent
/// fields at their defaults. The returned recipe carries its own confidence:
/// structured data short-circuits with a fixed value, DOM strategies score
/// themselves with their local weight table.
pub trait Extractor: Send + Sync {
    /// Diagnostic label recorded in `Recipe::source_site`.
    fn source_site(&self) -> &'static str;

    fn extract(&self, context: &ParsingContext) -> Result<Recipe, ParseFailure>;
}

/// Host-suffix lookup table mapping known sites to their hand-tuned strategy,
/// with the generic heuristic extractor as the default entry. Adding a site
/// means one `register` call; orchestration logic stays untouched.
pub struct ExtractorRegistry {
    entries: Vec<(&'static str, Box<dyn Extractor>)>,
    fallback: Box<dyn Extractor>,
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        let mut registry = ExtractorRegistry {
            entries: Vec::new(),
            fallback: Box::new(GenericHeuristicExtractor),
        };
        registry.register("marmiton.org", Box::new(sites::MarmitonExtractor));
        registry.register("cuisineaz.com", Box::new(sites::CuisineAzExtractor));
        registry
    }
}

impl ExtractorRegistry {
    pub fn register(&mut self, host_suffix: &'static str, extractor: Box<dyn Extractor>) {
        self.entries.push((host_suffix, extractor));
    }

    /// Returns the strategy for a hostname, matching on domain suffix so that
    /// "www.marmiton.org" hits the "marmiton.org" entry.
    pub fn for_host(&self, host: &str) -> &dyn Extractor {
        for (suffix, extractor) in &self.entries {
            if host == *suffix || host.ends_with(&format!(".{suffix}")) {
                return extractor.as_ref();
            }
        }
        self.fallback.as_ref()
    }
}

/// Joined, trimmed text of the first element matching any of the selectors.
pub(crate) fn first_text(document: &Html, selectors: &[&str]) -> Option<String> {
    for selector_str in selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let text = element
                    .text()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ");
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }
    None
}

/// Trimmed text of every element matching the first selector that yields
/// anything, in document order.
pub(crate) fn all_texts(document: &Html, selectors: &[&str]) -> Vec<String> {
    for selector_str in selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            let items: Vec<String> = document
                .select(&selector)
                .map(|el| {
                    el.text()
                        .collect::<Vec<_>>()
                        .join(" ")
                        .split_whitespace()
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .filter(|text| !text.is_empty())
                .collect();
            if !items.is_empty() {
                return items;
            }
        }
    }
    Vec::new()
}

/// First non-empty value of `attr` over the selector chain. Covers meta
/// content chains and image src lookups.
pub(crate) fn first_attr(document: &Html, selectors: &[&str], attr: &str) -> Option<String> {
    for selector_str in selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            for element in document.select(&selector) {
                if let Some(value) = element.value().attr(attr) {
                    let value = value.trim();
                    if !value.is_empty() {
                        return Some(value.to_string());
                    }
                }
            }
        }
    }
    None
}
