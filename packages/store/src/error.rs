use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Store unreachable or empty; the host falls back to the bundled document
    #[error("Site data unavailable: {0}")]
    LoadUnavailable(String),

    /// The store or its host does not accept writes
    #[error("Saving is not supported here: {0}")]
    SaveUnsupported(String),

    /// Network or server failure; the same save may succeed later
    #[error("Save failed: {0}")]
    SaveTransient(String),

    #[error("Site data rejected: {0}")]
    ValidationMismatch(String),
}

impl StoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::SaveTransient(_))
    }
}

impl From<folio_model::ModelError> for StoreError {
    fn from(e: folio_model::ModelError) -> Self {
        StoreError::ValidationMismatch(e.to_string())
    }
}
