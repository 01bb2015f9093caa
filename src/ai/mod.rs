//! Optional text-completion fallback, used only when structural extraction
//! comes back below the acceptance threshold. The pipeline runs without it;
//! any failure in here is logged and swallowed by the orchestrator.

mod open_ai;
mod prompt;
mod recover;

pub use open_ai::OpenAiCompletion;
pub use prompt::RECIPE_EXTRACTION_PROMPT;
pub use recover::{recover_recipe, AI_CONFIDENCE};

use crate::error::CompletionError;

/// A blocking text-completion backend.
pub trait TextCompletion: Send + Sync {
    /// Backend name recorded in diagnostics (e.g. "openai")
    fn provider_name(&self) -> &str;

    fn complete(&self, system_prompt: &str, prompt: &str) -> Result<String, CompletionError>;
}
