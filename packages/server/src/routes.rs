use crate::error::ApiError;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use folio_editor::{catalog, Template};
use folio_model::SiteDocument;
use folio_renderer::{render_index, render_not_found, render_page, RenderError};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// Current stored site document
pub(crate) async fn get_site_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    match state.host.store().load().await {
        Ok(value) => Ok(Json(value)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read site data");
            Err(e.into())
        }
    }
}

/// Replace the whole site document
pub(crate) async fn post_site_data(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    if state.read_only {
        return Err(ApiError::new(
            StatusCode::METHOD_NOT_ALLOWED,
            "Site data is read-only on this host",
        ));
    }

    let value: Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, format!("Invalid JSON: {}", e)))?;

    let (document, diagnostics) = SiteDocument::from_value(value)
        .map_err(|e| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    // Refuse rather than silently drop blocks the client sent
    if !diagnostics.is_empty() {
        let message = diagnostics
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, message));
    }

    if let Err(e) = state.host.commit(document).await {
        tracing::error!(error = %e, "Failed to update site data");
        return Err(e.into());
    }

    Ok(Json(json!({ "message": "Site data updated successfully" })))
}

pub(crate) async fn get_templates() -> Json<&'static [Template]> {
    Json(catalog())
}

pub(crate) async fn get_index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_index(&state.host.current(), &state.render))
}

pub(crate) async fn get_page(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Response {
    page_response(&state, &key)
}

/// Navigation paths render their page; anything else goes to the static
/// directory when one is configured.
pub(crate) async fn fallback(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let page_key = state.host.current().page_for_path(request.uri().path());
    if let Some(key) = page_key {
        return page_response(&state, &key);
    }

    match &state.static_dir {
        Some(dir) => match ServeDir::new(dir).oneshot(request).await {
            Ok(response) => response.into_response(),
            Err(never) => match never {},
        },
        None => not_found(&state, request.uri().path()),
    }
}

fn page_response(state: &AppState, key: &str) -> Response {
    match render_page(&state.host.current(), key, &state.render) {
        Ok(html) => Html(html).into_response(),
        Err(RenderError::PageNotFound(key)) => not_found(state, &key),
    }
}

fn not_found(state: &AppState, key: &str) -> Response {
    (StatusCode::NOT_FOUND, Html(render_not_found(key, &state.render))).into_response()
}
