//! Process-wide owner of the active site document.

use crate::error::StoreError;
use crate::seed::default_document;
use crate::store::ContentStore;
use folio_model::SiteDocument;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};

/// Where the active document came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentSource {
    Store,
    BundledDefault,
}

struct Active {
    document: Arc<SiteDocument>,
    source: DocumentSource,
}

/// Loads the document once at startup, hands out snapshots, and replaces it
/// only after a successful save or an explicit reload.
pub struct SiteHost {
    store: Arc<dyn ContentStore>,
    active: RwLock<Active>,
}

impl SiteHost {
    pub async fn start(store: Arc<dyn ContentStore>) -> Self {
        let host = Self {
            store,
            active: RwLock::new(Active {
                document: Arc::new(default_document().clone()),
                source: DocumentSource::BundledDefault,
            }),
        };
        host.reload().await;
        host
    }

    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    /// Snapshot of the active document
    pub fn current(&self) -> Arc<SiteDocument> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .document
            .clone()
    }

    pub fn source(&self) -> DocumentSource {
        self.active.read().unwrap_or_else(PoisonError::into_inner).source
    }

    /// Re-read the store, falling back to the bundled document when it
    /// cannot be read.
    pub async fn reload(&self) -> DocumentSource {
        let loaded = match self.store.load().await {
            Ok(value) => SiteDocument::from_value(value).map_err(StoreError::from),
            Err(e) => Err(e),
        };

        let (document, source) = match loaded {
            Ok((document, diagnostics)) => {
                if !diagnostics.is_empty() {
                    tracing::warn!(
                        store = self.store.name(),
                        held = diagnostics.len(),
                        "Site data had malformed blocks"
                    );
                }
                tracing::info!(store = self.store.name(), "Loaded site data");
                (document, DocumentSource::Store)
            }
            Err(e) => {
                tracing::warn!(store = self.store.name(), error = %e, "Using bundled site data");
                (default_document().clone(), DocumentSource::BundledDefault)
            }
        };

        self.set(Arc::new(document), source);
        source
    }

    /// Save the whole document and make it the active one.
    ///
    /// On failure the active document is left as it was.
    pub async fn commit(&self, document: SiteDocument) -> Result<Arc<SiteDocument>, StoreError> {
        let value = document.to_value()?;
        self.store.save(&value).await?;

        let document = Arc::new(document);
        self.set(document.clone(), DocumentSource::Store);
        tracing::info!(store = self.store.name(), "Site data updated");
        Ok(document)
    }

    fn set(&self, document: Arc<SiteDocument>, source: DocumentSource) {
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = Active { document, source };
    }
}
