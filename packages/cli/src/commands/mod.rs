pub mod edit;
pub mod pages;
pub mod render;
pub mod serve;
pub mod templates;
pub mod validate;

pub use edit::{edit, EditArgs};
pub use pages::{pages, PagesArgs};
pub use render::{render, RenderArgs};
pub use serve::{serve, ServeArgs};
pub use templates::{templates, TemplatesArgs};
pub use validate::{validate, ValidateArgs};

use anyhow::{bail, Context, Result};
use folio_model::SiteDocument;
use folio_store::{DocumentSource, FileStore, SiteHost};
use std::path::Path;
use std::sync::Arc;

/// Host over a site document file
pub(crate) async fn open_host(data_file: &Path, read_only: bool) -> SiteHost {
    let store = FileStore::new(data_file).read_only(read_only);
    SiteHost::start(Arc::new(store)).await
}

/// Host that is safe to save through.
///
/// The bundled default only stands in for a data file that does not exist.
/// An existing file that fails to load is reported instead of overwritten.
pub(crate) async fn open_host_for_writing(data_file: &Path, read_only: bool) -> Result<SiteHost> {
    let host = open_host(data_file, read_only).await;
    if host.source() == DocumentSource::BundledDefault && data_file.exists() {
        let value = host
            .store()
            .load()
            .await
            .with_context(|| format!("Failed to load {}", data_file.display()))?;
        SiteDocument::from_value(value)
            .with_context(|| format!("Failed to load {}", data_file.display()))?;
        bail!("Failed to load {}", data_file.display());
    }
    Ok(host)
}

/// Every page key reachable from navigation, then block pages outside it
pub(crate) fn page_keys(document: &SiteDocument) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    let reachable = document
        .navigation()
        .iter()
        .flat_map(|nav| std::iter::once(nav).chain(nav.children().iter()))
        .map(|nav| nav.slug());
    let block_pages = document.block_page_keys().map(str::to_string);

    for key in reachable.chain(block_pages) {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_keys() {
        let (doc, _) = SiteDocument::from_value(json!({
            "navigation": [
                { "name": "HOME", "path": "/" },
                { "name": "ABOUT", "path": "/about", "dropdown": [
                    { "name": "Company Overview", "path": "/about/overview" }
                ]}
            ],
            "company-overview": { "blocks": [] },
            "landing": { "blocks": [] }
        }))
        .unwrap();

        assert_eq!(
            page_keys(&doc),
            vec!["home", "about", "company-overview", "landing"]
        );
    }
}
