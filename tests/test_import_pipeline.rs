use recipe_import::{ImporterConfig, RecipeImporter};

const STRUCTURED_PAGE: &str = r#"
<!DOCTYPE html>
<html>
<head>
<script type="application/ld+json">
{
    "@context": "https://schema.org/",
    "@type": "Recipe",
    "name": "Tarte aux pommes",
    "description": "Un classique du dimanche",
    "image": "https://example.com/tarte.jpg",
    "prepTime": "PT20M",
    "cookTime": "PT45M",
    "recipeYield": "6 personnes",
    "recipeIngredient": ["200 g de farine", "3 pommes", "100 g de beurre"],
    "recipeInstructions": [
        {"@type": "HowToStep", "text": "Étaler la pâte dans le moule."},
        {"@type": "HowToStep", "text": "Disposer les pommes en rosace."},
        {"@type": "HowToStep", "text": "Enfourner 45 minutes à 180°C."}
    ]
}
</script>
</head>
<body>
    <h1>Ce titre DOM ne doit pas être utilisé</h1>
    <div class="recipe-ingredients"><ul><li>mauvais ingrédient</li></ul></div>
</body>
</html>
"#;

const HEURISTIC_PAGE: &str = r#"
<!DOCTYPE html>
<html>
<head>
    <meta property="og:description" content="Un dessert express.">
    <meta property="og:image" content="https://example.com/mousse.jpg">
</head>
<body>
    <h1>Mousse au chocolat</h1>
    <div class="recipe-ingredients">
        <ul>
            <li>200 g de chocolat noir</li>
            <li>6 oeufs</li>
            <li>1 pincée de sel</li>
        </ul>
    </div>
    <div class="recipe-instructions">
        <ol>
            <li>Faire fondre le chocolat au bain-marie.</li>
            <li>Incorporer les blancs montés en neige.</li>
            <li>Réserver au frais pendant quatre heures.</li>
        </ol>
    </div>
    <span class="prep-time">Préparation : 20 min</span>
</body>
</html>
"#;

fn importer() -> RecipeImporter {
    RecipeImporter::new(&ImporterConfig::default()).unwrap()
}

#[test]
fn test_invalid_scheme_fails_without_network() {
    let result = importer().import("ftp://example.com/recette");
    assert!(!result.success);
    assert!(result.message.contains("Invalid URL"));
    assert!(result.recipe.is_none());
}

#[test]
fn test_malformed_url_fails_without_network() {
    let result = importer().import("pas une url du tout");
    assert!(!result.success);
    assert!(result.message.contains("Invalid URL"));
}

#[test]
fn test_structured_markup_wins_over_heuristics() {
    let mut server = mockito::Server::new();
    let page = server
        .mock("GET", "/recette")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(STRUCTURED_PAGE)
        .create();

    let result = importer().import(&format!("{}/recette", server.url()));
    page.assert();

    assert!(result.success, "unexpected failure: {}", result.message);
    let recipe = result.recipe.unwrap();
    assert_eq!(recipe.name, "Tarte aux pommes");
    assert_eq!(recipe.source_site, "json-ld");
    assert_eq!(recipe.confidence, 0.9);
    assert_eq!(recipe.prep_minutes, 20);
    assert_eq!(recipe.cook_minutes, 45);
    assert_eq!(recipe.portions, 6);

    // Source document order is preserved
    let names: Vec<&str> = recipe.ingredients.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["farine", "pommes", "beurre"]);
    assert!(recipe.steps[0].starts_with("Étaler"));
    assert!(recipe.steps[2].starts_with("Enfourner"));
}

#[test]
fn test_heuristic_extraction_on_unknown_site() {
    let mut server = mockito::Server::new();
    let _page = server
        .mock("GET", "/mousse")
        .with_status(200)
        .with_body(HEURISTIC_PAGE)
        .create();

    let result = importer().import(&format!("{}/mousse", server.url()));
    assert!(result.success, "unexpected failure: {}", result.message);

    let recipe = result.recipe.unwrap();
    assert_eq!(recipe.source_site, "generic");
    assert!(recipe.confidence >= 0.5);
    assert_eq!(recipe.ingredients.len(), 3);
    assert_eq!(recipe.ingredients[0].name, "chocolat noir");
    assert_eq!(recipe.steps.len(), 3);
    assert_eq!(recipe.steps[0], "Faire fondre le chocolat au bain-marie.");
    assert_eq!(recipe.steps[2], "Réserver au frais pendant quatre heures.");
}

#[test]
fn test_http_error_is_reported() {
    let mut server = mockito::Server::new();
    let _page = server.mock("GET", "/disparue").with_status(404).create();

    let result = importer().import(&format!("{}/disparue", server.url()));
    assert!(!result.success);
    assert!(result.message.contains("404"));
}

#[test]
fn test_result_serialization_round_trip() {
    let mut server = mockito::Server::new();
    let _page = server
        .mock("GET", "/recette")
        .with_status(200)
        .with_body(STRUCTURED_PAGE)
        .create();

    let result = importer().import(&format!("{}/recette", server.url()));
    let json = serde_json::to_string(&result).unwrap();
    let back: recipe_import::ImportResult = serde_json::from_str(&json).unwrap();
    assert_eq!(result, back);
}
