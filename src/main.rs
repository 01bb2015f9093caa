use std::env;
use std::process::ExitCode;

use log::warn;
use recipe_import::{ImporterConfig, RecipeImporter};

fn main() -> ExitCode {
    env_logger::init();

    let urls: Vec<String> = env::args().skip(1).collect();
    if urls.is_empty() {
        eprintln!("usage: recipe-import <url> [<url>...]");
        return ExitCode::FAILURE;
    }

    let config = ImporterConfig::load().unwrap_or_else(|e| {
        warn!("falling back to default configuration: {e}");
        ImporterConfig::default()
    });

    let importer = match RecipeImporter::new(&config) {
        Ok(importer) => importer,
        Err(e) => {
            eprintln!("failed to initialize importer: {e}");
            return ExitCode::FAILURE;
        }
    };

    let results = importer.import_batch(&urls);
    let all_ok = results.iter().all(|r| r.success);

    match serde_json::to_string_pretty(&results) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("failed to serialize results: {e}");
            return ExitCode::FAILURE;
        }
    }

    if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
