use folio_model::SiteDocument;
use std::sync::OnceLock;

const SEED: &str = include_str!("../data/site.json");

static DEFAULT_DOCUMENT: OnceLock<SiteDocument> = OnceLock::new();

/// Bundled document served when no store can be read
pub fn default_document() -> &'static SiteDocument {
    DEFAULT_DOCUMENT.get_or_init(|| match SiteDocument::from_json_str(SEED) {
        Ok((document, _)) => document,
        Err(e) => {
            tracing::error!(error = %e, "Bundled site document is invalid");
            SiteDocument::new()
        }
    })
}
