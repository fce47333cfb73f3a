//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Store error: {0}")]
    Store(#[from] folio_store::StoreError),

    #[error("Model error: {0}")]
    Model(#[from] folio_model::ModelError),
}

impl EditorError {
    /// Whether trying the same save again may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            EditorError::Store(e) => e.is_retryable(),
            _ => false,
        }
    }
}
