use crate::error::StoreError;
use crate::store::ContentStore;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// In-process store for tests and embedding
#[derive(Default)]
pub struct MemoryStore {
    document: Mutex<Option<Value>>,
    read_only: AtomicBool,
    fail_next_save: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new(document: Value) -> Self {
        Self {
            document: Mutex::new(Some(document)),
            ..Default::default()
        }
    }

    /// Store with nothing saved yet; loads report it unavailable
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Make the next save fail as if the network dropped
    pub fn fail_next_save(&self) {
        self.fail_next_save.store(true, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Option<Value> {
        self.document
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of successful saves
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn load(&self) -> Result<Value, StoreError> {
        self.snapshot()
            .ok_or_else(|| StoreError::LoadUnavailable("nothing saved yet".to_string()))
    }

    async fn save(&self, document: &Value) -> Result<(), StoreError> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StoreError::SaveUnsupported("memory store is read-only".to_string()));
        }
        if self.fail_next_save.swap(false, Ordering::SeqCst) {
            return Err(StoreError::SaveTransient("simulated failure".to_string()));
        }

        *self.document.lock().unwrap_or_else(PoisonError::into_inner) = Some(document.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
