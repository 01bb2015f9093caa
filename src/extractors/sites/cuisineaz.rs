use log::debug;

use crate::error::ParseFailure;
use crate::extractors::{all_texts, first_attr, first_text, Extractor, ParsingContext};
use crate::model::Recipe;
use crate::parsing::{parse_ingredient_line, parse_minutes, parse_portions};
use crate::scoring::{score, DOMAIN_WEIGHTS};

/// CuisineAZ recipe pages: anchored ids for the ingredient and preparation
/// sections, times in a borderless table the microdata misses.
pub struct CuisineAzExtractor;

impl Extractor for CuisineAzExtractor {
    fn source_site(&self) -> &'static str {
        "cuisineaz"
    }

    fn extract(&self, context: &ParsingContext) -> Result<Recipe, ParseFailure> {
        let document = &context.document;

        let name = first_text(document, &["h1.recipe_title", "h1"]).unwrap_or_default();

        let description = first_attr(document, &["meta[name='description']"], "content")
            .or_else(|| first_text(document, &[".recipe_description"]))
            .unwrap_or_default();

        let ingredient_lines = all_texts(
            document,
            &["#ingredients li", ".ingredient_liste li", ".bu_cuisineaz_ingredients li"],
        );

        let step_lines = all_texts(
            document,
            &["#preparation li", ".preparation_etapes li", "#preparation p"],
        );

        let prep_minutes = first_text(document, &["#prepTime", ".prep_time"])
            .map(|text| parse_minutes(&text))
            .unwrap_or(0);
        let cook_minutes = first_text(document, &["#cookTime", ".cook_time"])
            .map(|text| parse_minutes(&text))
            .unwrap_or(0);

        let image_url = first_attr(document, &["meta[property='og:image']"], "content")
            .or_else(|| first_attr(document, &["#shape_recette img"], "src"));

        let portions = first_text(document, &["#titrePortions", ".nb_portions"])
            .map(|text| parse_portions(&text))
            .unwrap_or_else(|| parse_portions(""));

        if name.is_empty() && ingredient_lines.is_empty() && step_lines.is_empty() {
            return Err(ParseFailure::new("cuisineaz selectors matched nothing"));
        }

        let recipe = Recipe {
            name,
            description,
            prep_minutes,
            cook_minutes,
            portions,
            ingredients: ingredient_lines
                .iter()
                .map(|line| parse_ingredient_line(line))
                .collect(),
            steps: step_lines
                .into_iter()
                .filter(|s| Recipe::is_usable_step(s))
                .collect(),
            source_url: context.url.clone(),
            source_site: self.source_site().to_string(),
            image_url,
            ..Default::default()
        };

        let confidence = score(&recipe, &DOMAIN_WEIGHTS);
        debug!("cuisineaz: scored {confidence:.2} for {}", context.url);
        Ok(recipe.with_confidence(confidence))
    }
}
