//! # Folio Server
//!
//! HTTP surface over a [`SiteHost`]:
//!
//! | Route | |
//! |---|---|
//! | `GET /api/site-data` | stored site document |
//! | `POST /api/site-data` | replace the whole document |
//! | `GET /api/templates` | page template catalog |
//! | `GET /pages/{key}` | rendered page |
//! | `GET /` | page index |
//!
//! Other paths render the page reached by that navigation path, or fall
//! through to the static directory.

mod error;
mod routes;
mod state;

pub use error::ServerError;
pub use state::AppState;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use folio_store::{DataWatcher, SiteHost};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Largest accepted site document; inline base64 images make them big
pub const BODY_LIMIT: usize = 50 * 1024 * 1024;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/site-data",
            get(routes::get_site_data).post(routes::post_site_data),
        )
        .route("/api/templates", get(routes::get_templates))
        .route("/pages/:key", get(routes::get_page))
        .route("/", get(routes::get_index))
        .fallback(routes::fallback)
        .with_state(state)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub host: String,
    pub port: u16,
    pub static_dir: Option<PathBuf>,
    pub read_only: bool,
    /// Data file to watch; the host reloads when it changes on disk
    pub watch: Option<PathBuf>,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: None,
            read_only: false,
            watch: None,
        }
    }
}

pub async fn serve(host: Arc<SiteHost>, options: ServeOptions) -> Result<(), ServerError> {
    if let Some(path) = &options.watch {
        let mut watcher = DataWatcher::new(path)?;
        let host = host.clone();
        tracing::info!(path = %path.display(), "Watching site data");
        tokio::spawn(async move {
            while watcher.changed().await {
                let source = host.reload().await;
                tracing::info!(?source, "Reloaded site data after change on disk");
            }
        });
    }

    let state = AppState::new(host)
        .read_only(options.read_only)
        .static_dir(options.static_dir.clone());
    let app = router(Arc::new(state));

    let address = format!("{}:{}", options.host, options.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;

    tracing::info!("Server running on http://{}", address);
    axum::serve(listener, app).await?;
    Ok(())
}
