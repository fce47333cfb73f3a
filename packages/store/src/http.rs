use crate::error::StoreError;
use crate::store::ContentStore;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

pub const SITE_DATA_PATH: &str = "/api/site-data";

/// Client of a remote `/api/site-data` endpoint
pub struct HttpStore {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpStore {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), SITE_DATA_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Map a rejected save to the error the editor should show.
///
/// Static hosts answer writes with 404 or 405; those will never succeed.
pub fn classify_save_status(status: StatusCode, detail: String) -> StoreError {
    match status {
        StatusCode::NOT_FOUND | StatusCode::METHOD_NOT_ALLOWED => StoreError::SaveUnsupported(format!(
            "the host does not accept site data writes ({})",
            status
        )),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => StoreError::ValidationMismatch(detail),
        _ => StoreError::SaveTransient(format!("{}: {}", status, detail)),
    }
}

#[async_trait]
impl ContentStore for HttpStore {
    fn name(&self) -> &str {
        "http"
    }

    async fn load(&self) -> Result<Value, StoreError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| StoreError::LoadUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::LoadUnavailable(format!(
                "{} answered {}",
                self.endpoint,
                response.status()
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| StoreError::LoadUnavailable(e.to_string()))
    }

    async fn save(&self, document: &Value) -> Result<(), StoreError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(document)
            .send()
            .await
            .map_err(|e| StoreError::SaveTransient(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or(body);
        Err(classify_save_status(status, detail))
    }
}
