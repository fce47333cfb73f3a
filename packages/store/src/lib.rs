//! # Folio Store
//!
//! Persistence for the site document and the host that owns the active copy.
//!
//! Every store moves the whole document as one JSON value. The [`SiteHost`]
//! loads it once, falls back to the bundled [`default_document`] when the
//! store cannot be read, and swaps in a new document only after a save
//! succeeds.

mod error;
mod file;
mod host;
mod http;
mod memory;
mod seed;
#[cfg(feature = "sqlite")]
mod sqlite;
mod store;
mod watcher;

pub use error::StoreError;
pub use file::FileStore;
pub use host::{DocumentSource, SiteHost};
pub use http::{classify_save_status, HttpStore, SITE_DATA_PATH};
pub use memory::MemoryStore;
pub use seed::default_document;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
pub use store::ContentStore;
pub use watcher::{DataWatcher, WatcherError, WatcherResult};
