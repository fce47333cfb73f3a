use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::Value;

/// Persistence boundary for the whole site document.
///
/// Stores see the document as one JSON value. There are no partial updates:
/// `save` replaces whatever was stored before.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Short label used in logs
    fn name(&self) -> &str;

    async fn load(&self) -> Result<Value, StoreError>;

    async fn save(&self, document: &Value) -> Result<(), StoreError>;
}
