use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_store::{StoreError, WatcherError};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Watch error: {0}")]
    Watch(#[from] WatcherError),
}

/// JSON error body returned by the site-data API
#[derive(Debug)]
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::SaveUnsupported(_) => Self::new(StatusCode::METHOD_NOT_ALLOWED, e.to_string()),
            StoreError::ValidationMismatch(_) => Self::new(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            StoreError::LoadUnavailable(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read site data")
            }
            StoreError::SaveTransient(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update site data")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
