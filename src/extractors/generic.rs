use log::debug;
use scraper::{ElementRef, Html, Selector};

use crate::error::ParseFailure;
use crate::extractors::{all_texts, first_attr, first_text, Extractor, ParsingContext};
use crate::model::Recipe;
use crate::parsing::{parse_ingredient_line, parse_minutes, parse_portions};
use crate::scoring::{score, GENERIC_WEIGHTS};

/// Last structural resort for unknown sites: schema.org microdata attributes
/// first, then broad class-name substrings. Absent fields stay at their
/// defaults; only a document with neither ingredients nor steps nor a title
/// is reported as a failure.
pub struct GenericHeuristicExtractor;

/// Scoped microdata lookup. Searching `itemprop` globally picks up unrelated
/// page content (site title, author bio, ads), so everything is anchored on
/// a schema.org Recipe container.
fn recipe_container<'a>(document: &'a Html) -> Option<ElementRef<'a>> {
    let selector = Selector::parse("[itemscope]").unwrap();
    document.select(&selector).find(|element| {
        element
            .value()
            .attr("itemtype")
            .is_some_and(|t| t.contains("schema.org/Recipe") || t.contains("data-vocabulary.org/Recipe"))
    })
}

fn itemprop_text(root: ElementRef, prop: &str) -> Option<String> {
    let selector = Selector::parse(&format!("[itemprop='{prop}']")).ok()?;
    root.select(&selector).next().map(element_text)
}

fn itemprop_texts(root: ElementRef, prop: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(&format!("[itemprop='{prop}']")) else {
        return Vec::new();
    };
    root.select(&selector)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Time itemprops usually carry the machine value in a `datetime` or
/// `content` attribute, with a human label as text.
fn itemprop_duration(root: ElementRef, prop: &str) -> u32 {
    let Ok(selector) = Selector::parse(&format!("[itemprop='{prop}']")) else {
        return 0;
    };
    root.select(&selector)
        .next()
        .map(|el| {
            el.value()
                .attr("datetime")
                .or_else(|| el.value().attr("content"))
                .map(parse_minutes)
                .unwrap_or_else(|| parse_minutes(&element_text(el)))
        })
        .unwrap_or(0)
}

fn element_text(element: ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn extract_from_microdata(context: &ParsingContext) -> Option<Recipe> {
    let container = recipe_container(&context.document)?;

    let name = itemprop_text(container, "name").unwrap_or_default();
    let description = itemprop_text(container, "description").unwrap_or_default();

    let mut ingredient_lines = itemprop_texts(container, "recipeIngredient");
    if ingredient_lines.is_empty() {
        ingredient_lines = itemprop_texts(container, "ingredients");
    }

    let mut step_lines = itemprop_texts(container, "recipeInstructions");
    if step_lines.is_empty() {
        step_lines = itemprop_texts(container, "instructions");
    }

    let image_url = {
        let selector = Selector::parse("[itemprop='image']").unwrap();
        container.select(&selector).next().and_then(|el| {
            el.value()
                .attr("src")
                .or_else(|| el.value().attr("content"))
                .map(str::to_string)
        })
    };

    let portions = itemprop_text(container, "recipeYield")
        .map(|text| parse_portions(&text))
        .unwrap_or_else(|| parse_portions(""));

    Some(Recipe {
        name,
        description,
        prep_minutes: itemprop_duration(container, "prepTime"),
        cook_minutes: itemprop_duration(container, "cookTime"),
        portions,
        category: itemprop_text(container, "recipeCategory").unwrap_or_default(),
        ingredients: ingredient_lines
            .iter()
            .map(|line| parse_ingredient_line(line))
            .collect(),
        steps: step_lines
            .into_iter()
            .filter(|s| Recipe::is_usable_step(s))
            .collect(),
        image_url,
        ..Default::default()
    })
}

/// Keyword-labelled duration: the text of any matching element is scanned for
/// hour/minute groups ("Préparation : 20 min").
fn class_duration(document: &Html, selectors: &[&str]) -> u32 {
    for selector_str in selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            for element in document.select(&selector) {
                let minutes = parse_minutes(&element_text(element));
                if minutes > 0 {
                    return minutes;
                }
            }
        }
    }
    0
}

fn extract_from_classes(context: &ParsingContext) -> Recipe {
    let document = &context.document;

    let name = first_text(
        document,
        &["[class*='recipe-title']", "[class*='recipe-name']", "h1", "h2"],
    )
    .unwrap_or_default();

    let description = first_attr(
        document,
        &["meta[name='description']", "meta[property='og:description']"],
        "content",
    )
    .or_else(|| first_text(document, &["[class*='recipe-description']", "[class*='recipe-summary']"]))
    .unwrap_or_default();

    let ingredient_lines = all_texts(
        document,
        &[
            "[class*='ingredient'] li",
            "li[class*='ingredient']",
            "[class*='ingredient'] p",
        ],
    );

    let step_lines = all_texts(
        document,
        &[
            "[class*='instruction'] li",
            "[class*='step'] li",
            "[class*='preparation'] li",
            "li[class*='instruction']",
            "[class*='instruction'] p",
            "[class*='direction'] li",
        ],
    );

    let image_url = first_attr(document, &["meta[property='og:image']"], "content")
        .or_else(|| first_attr(document, &["[class*='recipe'] img", "article img"], "src"));

    let portions = first_text(
        document,
        &["[class*='serving']", "[class*='portion']", "[class*='yield']"],
    )
    .map(|text| parse_portions(&text))
    .unwrap_or_else(|| parse_portions(""));

    Recipe {
        name,
        description,
        prep_minutes: class_duration(document, &["[class*='prep']"]),
        cook_minutes: class_duration(document, &["[class*='cook']", "[class*='cuisson']"]),
        portions,
        ingredients: ingredient_lines
            .iter()
            .map(|line| parse_ingredient_line(line))
            .collect(),
        steps: step_lines
            .into_iter()
            .filter(|s| Recipe::is_usable_step(s))
            .collect(),
        image_url,
        ..Default::default()
    }
}

impl Extractor for GenericHeuristicExtractor {
    fn source_site(&self) -> &'static str {
        "generic"
    }

    fn extract(&self, context: &ParsingContext) -> Result<Recipe, ParseFailure> {
        let mut recipe = match extract_from_microdata(context) {
            Some(recipe) if !recipe.ingredients.is_empty() || !recipe.steps.is_empty() => {
                debug!("generic: extracted via microdata for {}", context.url);
                recipe
            }
            _ => {
                debug!("generic: falling back to class heuristics for {}", context.url);
                extract_from_classes(context)
            }
        };

        if recipe.name.is_empty() && recipe.ingredients.is_empty() && recipe.steps.is_empty() {
            return Err(ParseFailure::new("nothing recipe-shaped in the document"));
        }

        recipe.source_url = context.url.clone();
        recipe.source_site = self.source_site().to_string();
        let confidence = score(&recipe, &GENERIC_WEIGHTS);
        Ok(recipe.with_confidence(confidence))
    }
}
