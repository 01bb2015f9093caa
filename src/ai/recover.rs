use log::{debug, info};
use serde::Deserialize;

use crate::ai::{TextCompletion, RECIPE_EXTRACTION_PROMPT};
use crate::cancel::CancelToken;
use crate::error::CompletionError;
use crate::extractors::ParsingContext;
use crate::model::{Ingredient, Recipe, DEFAULT_PORTIONS};
use crate::text::{html_to_text, truncate_chars, MAX_AI_INPUT_CHARS};

/// Confidence assigned to any recipe the completion backend produces. Fixed:
/// the model gives no usable self-assessment, and 0.7 ranks it above failed
/// heuristics but below structured markup.
pub const AI_CONFIDENCE: f32 = 0.7;

#[derive(Debug, Deserialize)]
struct AiIngredient {
    #[serde(default)]
    name: String,
    quantity: Option<f64>,
    #[serde(default)]
    unit: String,
}

#[derive(Debug, Deserialize)]
struct AiRecipe {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    prep_minutes: u32,
    #[serde(default)]
    cook_minutes: u32,
    #[serde(default)]
    portions: Option<u32>,
    #[serde(default)]
    ingredients: Vec<AiIngredient>,
    #[serde(default)]
    steps: Vec<String>,
    #[serde(default)]
    error: String,
}

/// Last-resort extraction: renders the page to plain text, asks the
/// completion backend for recipe JSON and maps the reply into a `Recipe`.
pub fn recover_recipe(
    provider: &dyn TextCompletion,
    context: &ParsingContext,
    cancel: &CancelToken,
) -> Result<Recipe, CompletionError> {
    if cancel.is_cancelled() {
        return Err(CompletionError::Cancelled);
    }

    let text = html_to_text(&context.document);
    let excerpt = truncate_chars(&text, MAX_AI_INPUT_CHARS);
    info!(
        "escalating {} to {} ({} chars of text)",
        context.url,
        provider.provider_name(),
        excerpt.len()
    );

    let reply = provider.complete(RECIPE_EXTRACTION_PROMPT, excerpt)?;
    let payload = extract_json_object(&reply).ok_or_else(|| {
        CompletionError::BadResponse("reply contains no JSON object".to_string())
    })?;

    let ai_recipe: AiRecipe = serde_json::from_str(payload)
        .map_err(|e| CompletionError::BadResponse(format!("unparseable recipe JSON: {e}")))?;

    if !ai_recipe.error.is_empty() {
        return Err(CompletionError::BadResponse(ai_recipe.error));
    }
    if ai_recipe.name.trim().is_empty() {
        return Err(CompletionError::BadResponse(
            "reply carries no recipe name".to_string(),
        ));
    }

    debug!("ai fallback produced a recipe for {}", context.url);
    Ok(Recipe {
        name: ai_recipe.name.trim().to_string(),
        description: ai_recipe.description,
        prep_minutes: ai_recipe.prep_minutes,
        cook_minutes: ai_recipe.cook_minutes,
        portions: Recipe::clamp_portions(ai_recipe.portions.unwrap_or(DEFAULT_PORTIONS)),
        ingredients: ai_recipe
            .ingredients
            .into_iter()
            .map(|ing| Ingredient {
                name: ing.name.trim().to_string(),
                // Negative quantities are model noise, not data
                quantity: ing.quantity.filter(|q| *q >= 0.0),
                unit: ing.unit,
            })
            .collect(),
        steps: ai_recipe
            .steps
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| Recipe::is_usable_step(s))
            .collect(),
        source_url: context.url.clone(),
        source_site: format!("ai:{}", provider.provider_name()),
        image_url: None,
        ..Default::default()
    }
    .with_confidence(AI_CONFIDENCE))
}

/// Models occasionally wrap the JSON in prose or markdown fences despite the
/// prompt; keep only the outermost object.
fn extract_json_object(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (end > start).then(|| &reply[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedCompletion(String);

    impl TextCompletion for CannedCompletion {
        fn provider_name(&self) -> &str {
            "canned"
        }

        fn complete(&self, _system: &str, _prompt: &str) -> Result<String, CompletionError> {
            Ok(self.0.clone())
        }
    }

    fn junk_context() -> ParsingContext {
        ParsingContext::new(
            "https://example.com/page",
            "example.com",
            "<html><body><p>Texte sans structure exploitable.</p></body></html>",
        )
    }

    #[test]
    fn test_recovers_recipe_from_json_reply() {
        let provider = CannedCompletion(
            r#"```json
            {
                "name": "Crêpes",
                "description": "Pour la chandeleur",
                "prep_minutes": 10,
                "cook_minutes": 20,
                "portions": 4,
                "ingredients": [
                    {"name": "farine", "quantity": 250, "unit": "g"},
                    {"name": "oeufs", "quantity": 3, "unit": ""}
                ],
                "steps": ["Mélanger la farine et les oeufs.", "Cuire chaque crêpe une minute par face."],
                "error": ""
            }
            ```"#
                .to_string(),
        );

        let recipe = recover_recipe(&provider, &junk_context(), &CancelToken::new()).unwrap();
        assert_eq!(recipe.name, "Crêpes");
        assert_eq!(recipe.confidence, AI_CONFIDENCE);
        assert_eq!(recipe.source_site, "ai:canned");
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.ingredients[0].quantity, Some(250.0));
        assert_eq!(recipe.steps.len(), 2);
        assert_eq!(recipe.portions, 4);
    }

    #[test]
    fn test_error_field_is_a_failure() {
        let provider = CannedCompletion(
            r#"{"name": "", "error": "this page is not a recipe"}"#.to_string(),
        );
        assert!(matches!(
            recover_recipe(&provider, &junk_context(), &CancelToken::new()),
            Err(CompletionError::BadResponse(_))
        ));
    }

    #[test]
    fn test_non_json_reply_is_a_failure() {
        let provider = CannedCompletion("désolé, je ne peux pas aider".to_string());
        assert!(recover_recipe(&provider, &junk_context(), &CancelToken::new()).is_err());
    }

    #[test]
    fn test_cancellation_short_circuits() {
        let provider = CannedCompletion("{}".to_string());
        let cancel = CancelToken::new();
        cancel.cancel();
        assert!(matches!(
            recover_recipe(&provider, &junk_context(), &cancel),
            Err(CompletionError::Cancelled)
        ));
    }

    #[test]
    fn test_negative_quantities_are_dropped() {
        let provider = CannedCompletion(
            r#"{"name": "Essai", "ingredients": [{"name": "sel", "quantity": -2, "unit": "g"}],
                "steps": ["Une étape suffisamment longue."], "error": ""}"#
                .to_string(),
        );
        let recipe = recover_recipe(&provider, &junk_context(), &CancelToken::new()).unwrap();
        assert_eq!(recipe.ingredients[0].quantity, None);
    }
}
