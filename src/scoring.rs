use crate::model::Recipe;

/// Weighted signals used to score a heuristically extracted recipe.
///
/// Each strategy owns its table: the domain-specific extractors reward steps
/// and timings more generously than the generic one, a tuning inherited from
/// per-site calibration. Do not unify the tables without product confirmation.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceWeights {
    pub name_bonus: f32,
    pub per_ingredient: f32,
    pub ingredient_cap: f32,
    pub per_step: f32,
    pub step_cap: f32,
    pub time_bonus: f32,
    pub image_bonus: f32,
}

/// Table used by the hand-tuned site extractors.
pub const DOMAIN_WEIGHTS: ConfidenceWeights = ConfidenceWeights {
    name_bonus: 0.2,
    per_ingredient: 0.04,
    ingredient_cap: 0.3,
    per_step: 0.1,
    step_cap: 0.3,
    time_bonus: 0.15,
    image_bonus: 0.15,
};

/// Table used by the site-agnostic heuristic extractor.
pub const GENERIC_WEIGHTS: ConfidenceWeights = ConfidenceWeights {
    name_bonus: 0.2,
    per_ingredient: 0.04,
    ingredient_cap: 0.25,
    per_step: 0.08,
    step_cap: 0.25,
    time_bonus: 0.1,
    image_bonus: 0.1,
};

/// Weighted sum over the extracted fields, clamped into `[0, 1]`.
pub fn score(recipe: &Recipe, weights: &ConfidenceWeights) -> f32 {
    let mut total = 0.0;

    if recipe.name.trim().len() >= 3 {
        total += weights.name_bonus;
    }

    total += (recipe.ingredients.len() as f32 * weights.per_ingredient)
        .min(weights.ingredient_cap);
    total += (recipe.steps.len() as f32 * weights.per_step).min(weights.step_cap);

    if recipe.prep_minutes > 0 || recipe.cook_minutes > 0 {
        total += weights.time_bonus;
    }

    if recipe.image_url.as_deref().is_some_and(|u| !u.is_empty()) {
        total += weights.image_bonus;
    }

    total.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Ingredient;

    fn rich_recipe() -> Recipe {
        Recipe {
            name: "Gratin dauphinois".to_string(),
            prep_minutes: 20,
            cook_minutes: 60,
            ingredients: (0..8)
                .map(|i| Ingredient::named(format!("ingrédient {i}")))
                .collect(),
            steps: (0..5)
                .map(|i| format!("Étape numéro {i} de la recette"))
                .collect(),
            image_url: Some("https://example.com/gratin.jpg".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_rich_recipe_scores_high() {
        let recipe = rich_recipe();
        // 0.2 + 0.32 capped at 0.3 + 0.5 capped at 0.3 + 0.15 + 0.15
        assert!((score(&recipe, &DOMAIN_WEIGHTS) - 1.0).abs() < 1e-6);
        // Generic table caps lower
        assert!(score(&recipe, &GENERIC_WEIGHTS) < 1.0);
        assert!(score(&recipe, &GENERIC_WEIGHTS) >= 0.8);
    }

    #[test]
    fn test_empty_recipe_scores_zero() {
        let recipe = Recipe::default();
        assert_eq!(score(&recipe, &GENERIC_WEIGHTS), 0.0);
    }

    #[test]
    fn test_short_name_earns_no_bonus() {
        let recipe = Recipe {
            name: "ab".to_string(),
            ..Default::default()
        };
        assert_eq!(score(&recipe, &DOMAIN_WEIGHTS), 0.0);
    }

    #[test]
    fn test_score_never_exceeds_one() {
        let mut recipe = rich_recipe();
        recipe.ingredients
            .extend((0..100).map(|i| Ingredient::named(format!("extra {i}"))));
        let s = score(&recipe, &DOMAIN_WEIGHTS);
        assert!(s <= 1.0);
    }
}
