use html_escape::decode_html_entities;
use log::debug;
use scraper::Selector;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ParseFailure;
use crate::extractors::{Extractor, ParsingContext};
use crate::model::Recipe;
use crate::parsing::{parse_ingredient_line, parse_minutes, parse_portions};

/// Structured markup is considered authoritative; on success the generic
/// scorer is bypassed in favour of this fixed value.
pub const STRUCTURED_CONFIDENCE: f32 = 0.9;

/// Extracts a recipe from embedded schema.org JSON-LD blocks.
///
/// The document may carry the recipe at the top level, inside an array, or
/// under `@graph`; the first block that deserializes as a recipe wins. Broken
/// or irrelevant blocks are skipped, never raised.
pub struct StructuredDataExtractor;

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    name: String,
    #[serde(default)]
    description: Option<DescriptionType>,
    #[serde(default)]
    image: Option<ImageType>,
    #[serde(rename = "recipeIngredient", default)]
    recipe_ingredient: Vec<String>,
    #[serde(rename = "recipeInstructions")]
    recipe_instructions: RecipeInstructions,
    #[serde(rename = "prepTime", default)]
    prep_time: Option<String>,
    #[serde(rename = "cookTime", default)]
    cook_time: Option<String>,
    #[serde(rename = "recipeYield", default)]
    recipe_yield: Option<YieldType>,
    #[serde(rename = "recipeCategory", default)]
    recipe_category: Option<CategoryType>,
}

#[derive(Debug, Deserialize)]
struct TextObject {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DescriptionType {
    String(String),
    Object(TextObject),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageType {
    None,
    String(String),
    Object(ImageObject),
    MultipleStrings(Vec<String>),
    MultipleObjects(Vec<ImageObject>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum YieldType {
    Number(u32),
    String(String),
    Multiple(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CategoryType {
    String(String),
    Multiple(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct InstructionObject {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeInstructions {
    String(String),
    Multiple(Vec<String>),
    MultipleObject(Vec<InstructionObject>),
    HowTo(Vec<HowTo>),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "@type")]
enum HowTo {
    HowToStep(HowToStep),
    HowToSection(HowToSection),
}

#[derive(Debug, Deserialize)]
struct HowToStep {
    text: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HowToSection {
    #[serde(rename = "itemListElement")]
    item_list_element: Vec<HowToStep>,
}

fn decode_html_symbols(text: &str) -> String {
    // for some reason need to decode twice to get the correct string
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

/// Cleans the raw script payload before JSON parsing: some sites leave HTML
/// comments or trailing commas inside the block.
fn sanitize_json(json_str: &str) -> String {
    let mut cleaned = json_str.trim().to_string();

    if !cleaned.starts_with('{') && !cleaned.starts_with('[') {
        if let Some(start) = cleaned.find('{') {
            cleaned = cleaned[start..].to_string();
        }
    }

    cleaned = cleaned.replace(",]", "]").replace(",}", "}");
    cleaned = cleaned.replace("<!--", "").replace("-->", "");

    cleaned
}

fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(t)) => t.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(types)) => types
            .iter()
            .any(|t| t.as_str().is_some_and(|s| s.eq_ignore_ascii_case("recipe"))),
        _ => false,
    }
}

/// Finds the recipe node inside one JSON-LD payload, whatever its shape.
fn find_recipe_node(json_ld: &Value) -> Option<&Value> {
    if json_ld.is_array() {
        return json_ld
            .as_array()?
            .iter()
            .find(|item| is_recipe_type(item) || item.get("recipeInstructions").is_some());
    }
    if is_recipe_type(json_ld) || json_ld.get("recipeInstructions").is_some() {
        return Some(json_ld);
    }
    if let Some(graph) = json_ld.get("@graph") {
        return graph.as_array()?.iter().find(|item| is_recipe_type(item));
    }
    None
}

fn flatten_instructions(instructions: RecipeInstructions) -> Vec<String> {
    match instructions {
        RecipeInstructions::String(text) => vec![decode_html_symbols(&text)],
        RecipeInstructions::Multiple(steps) => {
            steps.iter().map(|s| decode_html_symbols(s)).collect()
        }
        RecipeInstructions::MultipleObject(steps) => steps
            .iter()
            .map(|obj| decode_html_symbols(&obj.text))
            .collect(),
        RecipeInstructions::HowTo(sections) => sections
            .into_iter()
            .flat_map(|section| match section {
                HowTo::HowToStep(step) => step_texts(step),
                HowTo::HowToSection(section) => section
                    .item_list_element
                    .into_iter()
                    .flat_map(step_texts)
                    .collect(),
            })
            .map(|text| decode_html_symbols(&text))
            .collect(),
    }
}

fn step_texts(step: HowToStep) -> Vec<String> {
    let mut texts = Vec::new();
    if let Some(text) = step.text {
        texts.push(text);
    }
    if let Some(desc) = step.description {
        texts.push(desc);
    }
    texts
}

fn build_recipe(json_ld_recipe: JsonLdRecipe, context: &ParsingContext) -> Recipe {
    let ingredients = json_ld_recipe
        .recipe_ingredient
        .iter()
        .map(|line| parse_ingredient_line(&decode_html_symbols(line)))
        .collect();

    let steps = flatten_instructions(json_ld_recipe.recipe_instructions)
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| Recipe::is_usable_step(s))
        .collect();

    let portions = match json_ld_recipe.recipe_yield {
        Some(YieldType::Number(n)) => Recipe::clamp_portions(n),
        Some(YieldType::String(text)) => parse_portions(&text),
        Some(YieldType::Multiple(texts)) => {
            parse_portions(texts.first().map(String::as_str).unwrap_or(""))
        }
        None => parse_portions(""),
    };

    let image_url = match json_ld_recipe.image {
        Some(ImageType::String(img)) => Some(decode_html_symbols(&img)),
        Some(ImageType::Object(img)) => Some(img.url),
        Some(ImageType::MultipleStrings(imgs)) => {
            imgs.first().map(|img| decode_html_symbols(img))
        }
        Some(ImageType::MultipleObjects(imgs)) => imgs.into_iter().next().map(|img| img.url),
        Some(ImageType::None) | None => None,
    };

    Recipe {
        name: decode_html_symbols(json_ld_recipe.name.trim()),
        description: match json_ld_recipe.description {
            Some(DescriptionType::String(desc)) => decode_html_symbols(&desc),
            Some(DescriptionType::Object(desc)) => decode_html_symbols(&desc.text),
            None => String::new(),
        },
        prep_minutes: json_ld_recipe
            .prep_time
            .as_deref()
            .map(parse_minutes)
            .unwrap_or(0),
        cook_minutes: json_ld_recipe
            .cook_time
            .as_deref()
            .map(parse_minutes)
            .unwrap_or(0),
        portions,
        category: match json_ld_recipe.recipe_category {
            Some(CategoryType::String(cat)) => decode_html_symbols(&cat),
            Some(CategoryType::Multiple(cats)) => cats
                .first()
                .map(|cat| decode_html_symbols(cat))
                .unwrap_or_default(),
            None => String::new(),
        },
        ingredients,
        steps,
        source_url: context.url.clone(),
        source_site: "json-ld".to_string(),
        image_url,
        ..Default::default()
    }
    .with_confidence(STRUCTURED_CONFIDENCE)
}

impl Extractor for StructuredDataExtractor {
    fn source_site(&self) -> &'static str {
        "json-ld"
    }

    fn extract(&self, context: &ParsingContext) -> Result<Recipe, ParseFailure> {
        let selector = Selector::parse("script[type='application/ld+json']").unwrap();

        for script in context.document.select(&selector) {
            let cleaned = sanitize_json(&script.inner_html());
            let Ok(json_ld) = serde_json::from_str::<Value>(&cleaned) else {
                continue;
            };

            let Some(node) = find_recipe_node(&json_ld) else {
                debug!("JSON-LD block without a recipe node, skipping");
                continue;
            };

            match serde_json::from_value::<JsonLdRecipe>(node.clone()) {
                Ok(json_ld_recipe) => {
                    let recipe = build_recipe(json_ld_recipe, context);
                    if recipe.name.is_empty() {
                        debug!("JSON-LD recipe with empty name, skipping");
                        continue;
                    }
                    return Ok(recipe);
                }
                Err(e) => {
                    debug!("JSON-LD recipe node failed to deserialize: {e}");
                }
            }
        }

        Err(ParseFailure::new(
            "no usable recipe found in any JSON-LD block",
        ))
    }
}
