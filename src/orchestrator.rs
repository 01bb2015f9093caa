use log::{debug, info, warn};

use crate::ai::{recover_recipe, TextCompletion};
use crate::cancel::CancelToken;
use crate::extractors::{
    Extractor, ExtractorRegistry, ParsingContext, StructuredDataExtractor,
};
use crate::fetcher::{validate_url, Fetcher};
use crate::model::{ImportResult, Recipe};

/// Structural results below this confidence (or without a name) are escalated
/// to the AI fallback when one is configured.
pub const ACCEPT_THRESHOLD: f32 = 0.3;

/// Drives one URL through fetch, strategy selection, scoring and the optional
/// AI escalation, always ending in a well-formed `ImportResult`. Nothing in
/// here panics or raises past this boundary.
pub struct Orchestrator<'a> {
    fetcher: &'a Fetcher,
    registry: &'a ExtractorRegistry,
    ai: Option<&'a dyn TextCompletion>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        fetcher: &'a Fetcher,
        registry: &'a ExtractorRegistry,
        ai: Option<&'a dyn TextCompletion>,
    ) -> Self {
        Orchestrator {
            fetcher,
            registry,
            ai,
        }
    }

    pub fn import(&self, url: &str, cancel: &CancelToken) -> ImportResult {
        // Init -> Fetched
        let parsed = match validate_url(url) {
            Ok(parsed) => parsed,
            Err(e) => return ImportResult::failure(e.to_string()),
        };
        let body = match self.fetcher.fetch(&parsed, cancel) {
            Ok(body) => body,
            Err(e) => return ImportResult::failure(format!("Failed to fetch {url}: {e}")),
        };

        let host = parsed.host_str().unwrap_or_default();
        let context = ParsingContext::new(url, host, &body);

        // Fetched -> Parsed: structured data wins over any heuristic when present
        let recipe = self.run_strategies(&context);

        // Parsed -> Accepted | Escalated
        let accepted = recipe.confidence >= ACCEPT_THRESHOLD && !recipe.name.is_empty();
        let recipe = if accepted {
            recipe
        } else {
            self.escalate(&context, recipe, cancel)
        };

        finalize(url, recipe)
    }

    fn run_strategies(&self, context: &ParsingContext) -> Recipe {
        match StructuredDataExtractor.extract(context) {
            Ok(recipe) => {
                info!("structured markup accepted for {}", context.url);
                recipe
            }
            Err(reason) => {
                debug!("structured extraction failed for {}: {reason}", context.url);
                let strategy = self.registry.for_host(&context.host);
                match strategy.extract(context) {
                    Ok(recipe) => {
                        info!(
                            "strategy '{}' scored {:.2} for {}",
                            recipe.source_site, recipe.confidence, context.url
                        );
                        recipe
                    }
                    Err(reason) => {
                        debug!(
                            "strategy '{}' failed for {}: {reason}",
                            strategy.source_site(),
                            context.url
                        );
                        // Best-effort empty result; escalation may still rescue it
                        Recipe {
                            source_url: context.url.clone(),
                            source_site: strategy.source_site().to_string(),
                            ..Default::default()
                        }
                    }
                }
            }
        }
    }

    /// Tries the AI fallback exactly once; its fixed-confidence result is
    /// adopted only when it beats the structural one. Every AI-side failure
    /// leaves the structural result standing.
    fn escalate(
        &self,
        context: &ParsingContext,
        structural: Recipe,
        cancel: &CancelToken,
    ) -> Recipe {
        let Some(provider) = self.ai else {
            debug!("no AI fallback configured, keeping structural result");
            return structural;
        };

        match recover_recipe(provider, context, cancel) {
            Ok(ai_recipe) if ai_recipe.confidence > structural.confidence => ai_recipe,
            Ok(_) => structural,
            Err(e) => {
                warn!("AI fallback failed for {}: {e}", context.url);
                structural
            }
        }
    }
}

/// Terminal validation: low-confidence partial results still succeed so a
/// human can review them; only a missing name, or missing ingredients/steps
/// at low confidence, count as failure.
fn finalize(url: &str, recipe: Recipe) -> ImportResult {
    let mut errors = Vec::new();
    if recipe.name.is_empty() {
        errors.push("no name found".to_string());
    }
    if recipe.ingredients.is_empty() {
        errors.push("no ingredient found".to_string());
    }
    if recipe.steps.is_empty() {
        errors.push("no step found".to_string());
    }

    let low_confidence = recipe.confidence < ACCEPT_THRESHOLD;
    let success = !recipe.name.is_empty()
        && !(recipe.ingredients.is_empty() && low_confidence)
        && !(recipe.steps.is_empty() && low_confidence);

    let message = if success {
        format!(
            "Recipe '{}' imported via {} (confidence {:.2})",
            recipe.name, recipe.source_site, recipe.confidence
        )
    } else {
        format!("Could not extract a recipe from {url}")
    };

    // Attach whatever partial data was recovered, even on failure
    let has_partial_data =
        !recipe.name.is_empty() || !recipe.ingredients.is_empty() || !recipe.steps.is_empty();

    ImportResult {
        success,
        message,
        recipe: has_partial_data.then_some(recipe),
        errors,
    }
}
