use log::debug;
use scraper::Selector;

use crate::error::ParseFailure;
use crate::extractors::{all_texts, first_attr, first_text, Extractor, ParsingContext};
use crate::model::Recipe;
use crate::parsing::{parse_ingredient_line, parse_minutes, parse_portions};
use crate::scoring::{score, DOMAIN_WEIGHTS};

/// Marmiton ships JSON-LD, but it is frequently stale or truncated on older
/// recipe pages; these selectors follow the rendered recipe card instead.
pub struct MarmitonExtractor;

impl MarmitonExtractor {
    fn labelled_duration(&self, context: &ParsingContext, keywords: &[&str]) -> u32 {
        let Ok(selector) =
            Selector::parse(".recipe-primary__item, .recipe-infos__item, .time__details div")
        else {
            return 0;
        };
        for element in context.document.select(&selector) {
            let text = element
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();
            if keywords.iter().any(|k| text.contains(k)) {
                let minutes = parse_minutes(&text);
                if minutes > 0 {
                    return minutes;
                }
            }
        }
        0
    }
}

impl Extractor for MarmitonExtractor {
    fn source_site(&self) -> &'static str {
        "marmiton"
    }

    fn extract(&self, context: &ParsingContext) -> Result<Recipe, ParseFailure> {
        let document = &context.document;

        let name = first_text(document, &["h1.main-title", "h1"]).unwrap_or_default();

        let description = first_text(document, &[".recipe-header__description"])
            .or_else(|| {
                first_attr(document, &["meta[property='og:description']"], "content")
            })
            .unwrap_or_default();

        let ingredient_lines = all_texts(
            document,
            &[
                ".recipe-ingredients__list__item",
                ".card-ingredient-content",
                ".mrtn-recette_ingredients-items li",
            ],
        );

        let step_lines = all_texts(
            document,
            &[
                ".recipe-step-list__container p",
                ".recipe-preparation__list__item",
            ],
        );

        let image_url = first_attr(document, &["meta[property='og:image']"], "content")
            .or_else(|| first_attr(document, &[".recipe-media-viewer img"], "src"));

        let portions = first_text(
            document,
            &[
                ".recipe-ingredients__qt-counter__value",
                ".mrtn-recette_ingredients-counter",
            ],
        )
        .map(|text| parse_portions(&text))
        .unwrap_or_else(|| parse_portions(""));

        if name.is_empty() && ingredient_lines.is_empty() && step_lines.is_empty() {
            return Err(ParseFailure::new("marmiton selectors matched nothing"));
        }

        let recipe = Recipe {
            name,
            description,
            prep_minutes: self.labelled_duration(context, &["préparation", "prep"]),
            cook_minutes: self.labelled_duration(context, &["cuisson", "cook"]),
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
        debug!("marmiton: scored {confidence:.2} for {}", context.url);
        Ok(recipe.with_confidence(confidence))
    }
}
