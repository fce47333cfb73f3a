//! Site document kept as one row of a SQLite table.

use crate::error::StoreError;
use crate::store::ContentStore;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;

const CONFIG_ID: &str = "main_config";

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the database at `url` and make sure the table exists
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(|e| StoreError::LoadUnavailable(e.to_string()))?;
        let store = Self::new(pool);
        store.init().await?;
        Ok(store)
    }

    pub async fn init(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS site_configs (
                id TEXT PRIMARY KEY,
                content TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::LoadUnavailable(e.to_string()))?;

        Ok(())
    }

    /// When the stored document was last written
    pub async fn updated_at(&self) -> Result<Option<String>, StoreError> {
        let row = sqlx::query("SELECT updated_at FROM site_configs WHERE id = ?")
            .bind(CONFIG_ID)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::LoadUnavailable(e.to_string()))?;
        Ok(row.map(|row| row.get("updated_at")))
    }
}

#[async_trait]
impl ContentStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn load(&self) -> Result<Value, StoreError> {
        let row = sqlx::query("SELECT content FROM site_configs WHERE id = ?")
            .bind(CONFIG_ID)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::LoadUnavailable(e.to_string()))?;

        let Some(row) = row else {
            return Err(StoreError::LoadUnavailable("no saved site configuration".to_string()));
        };
        let content: String = row.get("content");
        serde_json::from_str(&content).map_err(|e| StoreError::LoadUnavailable(e.to_string()))
    }

    async fn save(&self, document: &Value) -> Result<(), StoreError> {
        let content = serde_json::to_string(document)
            .map_err(|e| StoreError::ValidationMismatch(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO site_configs (id, content, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                content = excluded.content,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(CONFIG_ID)
        .bind(&content)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::SaveTransient(e.to_string()))?;

        Ok(())
    }
}
