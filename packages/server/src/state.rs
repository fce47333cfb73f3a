use folio_renderer::RenderOptions;
use folio_store::SiteHost;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared state for HTTP handlers
pub struct AppState {
    pub host: Arc<SiteHost>,
    /// Answer writes with 405, as static hosting does
    pub read_only: bool,
    pub static_dir: Option<PathBuf>,
    pub render: RenderOptions,
}

impl AppState {
    pub fn new(host: Arc<SiteHost>) -> Self {
        Self {
            host,
            read_only: false,
            static_dir: None,
            render: RenderOptions::default(),
        }
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn static_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.static_dir = dir;
        self
    }
}
