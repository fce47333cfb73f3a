//! # Edit Session Management
//!
//! An EditSession holds one editor's working copy of the site document next
//! to the base copy it was loaded from. Mutations only touch the working
//! copy; saving hands the whole document to the [`SiteHost`].

use crate::form::BlockForm;
use crate::ids::IdGenerator;
use crate::mutations::{Mutation, MutationResult};
use crate::EditorError;
use folio_model::{BlockId, SiteDocument};
use folio_store::SiteHost;
use std::sync::Arc;

pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    /// Document as last loaded or saved
    base: Arc<SiteDocument>,

    /// Document being edited
    working: SiteDocument,

    version: u64,

    ids: IdGenerator,

    /// Mutations applied since the last load or save
    pending_mutations: Vec<Mutation>,
}

impl EditSession {
    pub fn new(id: impl Into<String>, base: Arc<SiteDocument>) -> Self {
        Self::with_ids(id, base, IdGenerator::new())
    }

    pub fn with_ids(id: impl Into<String>, base: Arc<SiteDocument>, ids: IdGenerator) -> Self {
        Self {
            id: id.into(),
            working: (*base).clone(),
            base,
            version: 0,
            ids,
            pending_mutations: Vec::new(),
        }
    }

    /// Start editing the host's current document
    pub fn open(id: impl Into<String>, host: &SiteHost) -> Self {
        Self::new(id, host.current())
    }

    pub fn document(&self) -> &SiteDocument {
        &self.working
    }

    pub fn base(&self) -> &SiteDocument {
        &self.base
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_dirty(&self) -> bool {
        self.working != *self.base
    }

    pub fn pending(&self) -> &[Mutation] {
        &self.pending_mutations
    }

    /// Apply a mutation to the working copy.
    ///
    /// A rejected mutation leaves the working copy and version unchanged.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let created = mutation.apply(&mut self.working, &mut self.ids)?;
        self.version += 1;
        self.pending_mutations.push(mutation);
        Ok(MutationResult {
            version: self.version,
            created,
        })
    }

    /// Form projection of one block of the working copy
    pub fn form(&self, page: &str, id: &BlockId) -> Option<BlockForm> {
        self.working
            .block_page(page)
            .and_then(|p| p.find(id))
            .map(BlockForm::for_block)
    }

    /// Throw the working copy away and start over from the host's document
    pub fn reload(&mut self, host: &SiteHost) {
        self.base = host.current();
        self.working = (*self.base).clone();
        self.pending_mutations.clear();
        self.version += 1;
    }

    /// Submit the whole working copy.
    ///
    /// On failure the working copy and pending mutations are kept so the
    /// save can be retried.
    pub async fn save(&mut self, host: &SiteHost) -> Result<(), EditorError> {
        match host.commit(self.working.clone()).await {
            Ok(saved) => {
                tracing::info!(session = %self.id, mutations = self.pending_mutations.len(), "Saved site document");
                self.base = saved;
                self.pending_mutations.clear();
                Ok(())
            }
            Err(e) => {
                tracing::error!(session = %self.id, error = %e, "Failed to save site document");
                Err(e.into())
            }
        }
    }
}
