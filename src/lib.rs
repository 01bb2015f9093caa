//! Recipe extraction pipeline: turns an arbitrary web page describing a
//! cooking recipe into a structured record.
//!
//! Strategies are tried in decreasing order of confidence: embedded JSON-LD
//! markup first, then a hand-tuned extractor for known sites (or the generic
//! heuristic one), and finally an optional text-completion fallback when the
//! structural confidence is too low. Every per-URL failure is folded into an
//! [`ImportResult`]; the public surface never panics.
//!
//! ```no_run
//! use recipe_import::{ImporterConfig, RecipeImporter};
//!
//! # fn main() -> Result<(), recipe_import::ImportError> {
//! let importer = RecipeImporter::new(&ImporterConfig::default())?;
//! let result = importer.import("https://www.marmiton.org/recettes/tarte");
//! if let Some(recipe) = result.recipe {
//!     println!("{} ({} ingredients)", recipe.name, recipe.ingredients.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod ai;
mod batch;
mod cancel;
pub mod config;
pub mod error;
pub mod extractors;
mod fetcher;
pub mod model;
mod orchestrator;
pub mod parsing;
pub mod scoring;
mod text;

pub use batch::BatchRunner;
pub use cancel::CancelToken;
pub use config::ImporterConfig;
pub use error::{CompletionError, FetchError, ImportError, ParseFailure};
pub use fetcher::Fetcher;
pub use model::{Difficulty, ImportResult, Ingredient, Recipe};
pub use orchestrator::{Orchestrator, ACCEPT_THRESHOLD};

use log::warn;

use crate::ai::{OpenAiCompletion, TextCompletion};
use crate::extractors::ExtractorRegistry;

/// The importer service: one HTTP client, the strategy registry and the
/// optional completion backend, constructed once by the caller and reused
/// across calls so the connection pool survives between imports.
pub struct RecipeImporter {
    fetcher: Fetcher,
    registry: ExtractorRegistry,
    ai: Option<Box<dyn TextCompletion>>,
}

impl RecipeImporter {
    /// Builds the service from configuration. A misconfigured AI section
    /// degrades to structural-only extraction instead of failing construction.
    pub fn new(config: &ImporterConfig) -> Result<Self, ImportError> {
        let fetcher = Fetcher::new(&config.fetch)?;

        let ai: Option<Box<dyn TextCompletion>> = if config.ai.enabled {
            match OpenAiCompletion::from_config(&config.ai) {
                Ok(provider) => Some(Box::new(provider)),
                Err(e) => {
                    warn!("AI fallback disabled: {e}");
                    None
                }
            }
        } else {
            None
        };

        Ok(RecipeImporter {
            fetcher,
            registry: ExtractorRegistry::default(),
            ai,
        })
    }

    /// Replaces the completion backend. Mostly useful for tests and for
    /// callers bringing their own provider implementation.
    pub fn with_completion(mut self, provider: Box<dyn TextCompletion>) -> Self {
        self.ai = Some(provider);
        self
    }

    /// Imports a single URL. Never panics; every failure comes back as a
    /// well-formed result.
    pub fn import(&self, url: &str) -> ImportResult {
        self.import_with_cancel(url, &CancelToken::new())
    }

    pub fn import_with_cancel(&self, url: &str, cancel: &CancelToken) -> ImportResult {
        Orchestrator::new(&self.fetcher, &self.registry, self.ai.as_deref()).import(url, cancel)
    }

    /// Imports a list of URLs sequentially, one result per URL in input order.
    pub fn import_batch(&self, urls: &[String]) -> Vec<ImportResult> {
        self.import_batch_with_cancel(urls, &CancelToken::new())
    }

    pub fn import_batch_with_cancel(
        &self,
        urls: &[String],
        cancel: &CancelToken,
    ) -> Vec<ImportResult> {
        BatchRunner::new(self).run(urls, cancel)
    }
}
