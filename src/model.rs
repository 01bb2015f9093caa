use serde::{Deserialize, Serialize};

/// Portions outside this range are clamped; absent values fall back to the default.
pub const MIN_PORTIONS: u32 = 1;
pub const MAX_PORTIONS: u32 = 20;
pub const DEFAULT_PORTIONS: u32 = 4;

/// Steps shorter than this are boilerplate (captions, "Step 1" labels) and dropped.
pub const MIN_STEP_LEN: usize = 10;

/// A single ingredient line after quantity/unit tokenization.
///
/// `quantity` is absent when the line carried no leading number; `unit` is the
/// empty string when no known unit token matched. An `Ingredient` with an empty
/// name is still a valid value; callers decide whether to discard it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: String,
}

impl Ingredient {
    pub fn named(name: impl Into<String>) -> Self {
        Ingredient {
            name: name.into(),
            quantity: None,
            unit: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// An extracted recipe. Produced once per extraction attempt and never mutated
/// afterwards; construction clamps the fields with range invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prep_minutes: u32,
    #[serde(default)]
    pub cook_minutes: u32,
    #[serde(default = "default_portions")]
    pub portions: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub source_url: String,
    /// Label of the strategy or domain that produced this result, for diagnostics.
    #[serde(default)]
    pub source_site: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub confidence: f32,
}

fn default_portions() -> u32 {
    DEFAULT_PORTIONS
}

impl Default for Recipe {
    fn default() -> Self {
        Recipe {
            name: String::new(),
            description: String::new(),
            prep_minutes: 0,
            cook_minutes: 0,
            portions: DEFAULT_PORTIONS,
            difficulty: Difficulty::default(),
            category: String::new(),
            ingredients: Vec::new(),
            steps: Vec::new(),
            source_url: String::new(),
            source_site: String::new(),
            image_url: None,
            confidence: 0.0,
        }
    }
}

impl Recipe {
    /// Returns a copy with `confidence` clamped into `[0, 1]`.
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Clamps a raw serving count into the allowed range.
    pub fn clamp_portions(portions: u32) -> u32 {
        portions.clamp(MIN_PORTIONS, MAX_PORTIONS)
    }

    /// A step is kept only when it carries more text than a caption or label.
    pub fn is_usable_step(step: &str) -> bool {
        step.trim().len() > MIN_STEP_LEN
    }
}

/// Outcome of one import attempt. `recipe` is attached even on failure when any
/// partial structural data was recovered, so a human can correct it rather than
/// starting from nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportResult {
    pub success: bool,
    pub message: String,
    pub recipe: Option<Recipe>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ImportResult {
    pub fn failure(message: impl Into<String>) -> Self {
        ImportResult {
            success: false,
            message: message.into(),
            recipe: None,
            errors: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_is_clamped() {
        let recipe = Recipe::default().with_confidence(1.7);
        assert_eq!(recipe.confidence, 1.0);
        let recipe = Recipe::default().with_confidence(-0.2);
        assert_eq!(recipe.confidence, 0.0);
    }

    #[test]
    fn test_portions_clamp() {
        assert_eq!(Recipe::clamp_portions(0), 1);
        assert_eq!(Recipe::clamp_portions(50), 20);
        assert_eq!(Recipe::clamp_portions(6), 6);
    }

    #[test]
    fn test_step_filter() {
        assert!(!Recipe::is_usable_step("Step 1"));
        assert!(Recipe::is_usable_step("Préchauffer le four à 180°C."));
    }

    #[test]
    fn test_import_result_round_trip() {
        let result = ImportResult {
            success: true,
            message: "Recipe imported".to_string(),
            recipe: Some(Recipe {
                name: "Tarte aux pommes".to_string(),
                portions: 6,
                ingredients: vec![Ingredient {
                    name: "farine".to_string(),
                    quantity: Some(200.0),
                    unit: "g".to_string(),
                }],
                steps: vec!["Étaler la pâte dans le moule.".to_string()],
                confidence: 0.9,
                ..Default::default()
            }),
            errors: vec![],
        };

        let json = serde_json::to_string(&result).unwrap();
        let back: ImportResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}
