use log::info;

use crate::cancel::CancelToken;
use crate::model::ImportResult;
use crate::RecipeImporter;

/// Sequentially drives the importer over a list of URLs.
///
/// One result per input URL, in the same order. URLs are processed strictly
/// one at a time to stay gentle toward source sites and a rate-sensitive AI
/// backend; a failure on one URL never aborts the remaining items.
/// Cancellation takes effect between items: remaining URLs come back as
/// failures without any network traffic.
pub struct BatchRunner<'a> {
    importer: &'a RecipeImporter,
}

impl<'a> BatchRunner<'a> {
    pub fn new(importer: &'a RecipeImporter) -> Self {
        BatchRunner { importer }
    }

    pub fn run(&self, urls: &[String], cancel: &CancelToken) -> Vec<ImportResult> {
        urls.iter()
            .enumerate()
            .map(|(index, url)| {
                if cancel.is_cancelled() {
                    return ImportResult::failure(format!("Import of {url} cancelled"));
                }
                info!("importing {url} ({}/{})", index + 1, urls.len());
                self.importer.import_with_cancel(url, cancel)
            })
            .collect()
    }
}
