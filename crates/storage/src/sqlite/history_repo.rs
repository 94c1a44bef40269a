use async_trait::async_trait;
use chrono::Utc;
use quiz_core::model::History;
use sqlx::Row;

use crate::repository::{
    HISTORY_KEY, HistoryRepository, StorageError, decode_history, encode_history,
};

use super::SqliteRepository;

#[async_trait]
impl HistoryRepository for SqliteRepository {
    async fn load_history(&self) -> Result<History, StorageError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?1")
            .bind(HISTORY_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Err(StorageError::NotFound);
        };

        let raw: String = row
            .try_get("value")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        decode_history(&raw)
    }

    async fn save_history(&self, history: &History) -> Result<(), StorageError> {
        let encoded = encode_history(history)?;
        sqlx::query(
            r"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(HISTORY_KEY)
        .bind(encoded)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn clear_history(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(HISTORY_KEY)
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
