use crate::error::StoreError;
use crate::store::ContentStore;
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Site document kept in one JSON file, written with two-space indentation.
pub struct FileStore {
    path: PathBuf,
    read_only: bool,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            read_only: false,
        }
    }

    /// Refuse saves, as static hosting does
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl ContentStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn load(&self) -> Result<Value, StoreError> {
        let source = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| StoreError::LoadUnavailable(format!("{}: {}", self.path.display(), e)))?;

        serde_json::from_str(&source)
            .map_err(|e| StoreError::LoadUnavailable(format!("{}: {}", self.path.display(), e)))
    }

    async fn save(&self, document: &Value) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::SaveUnsupported(format!(
                "{} is read-only",
                self.path.display()
            )));
        }

        let contents = serde_json::to_string_pretty(document)
            .map_err(|e| StoreError::ValidationMismatch(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::SaveTransient(e.to_string()))?;
        }

        // Stage beside the target, then rename over it
        let staging = self.staging_path();
        tokio::fs::write(&staging, contents)
            .await
            .map_err(|e| StoreError::SaveTransient(format!("{}: {}", staging.display(), e)))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|e| StoreError::SaveTransient(format!("{}: {}", self.path.display(), e)))?;

        tracing::debug!(path = %self.path.display(), "Wrote site data");
        Ok(())
    }
}
