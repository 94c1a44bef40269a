use async_trait::async_trait;
use quiz_core::model::History;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Key under which the serialized history map is stored.
pub const HISTORY_KEY: &str = "quiz_history";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Encode a history map into its stored JSON form.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_history(history: &History) -> Result<String, StorageError> {
    serde_json::to_string(history).map_err(|err| StorageError::Serialization(err.to_string()))
}

/// Decode a stored JSON value into a history map.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the value is not a JSON object of booleans.
pub fn decode_history(raw: &str) -> Result<History, StorageError> {
    serde_json::from_str(raw).map_err(|err| StorageError::Serialization(err.to_string()))
}

/// Repository contract for the per-question answer history.
///
/// The whole map is read and written at once.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Load the stored history.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if nothing has been stored yet,
    /// `StorageError::Serialization` if the stored value is corrupt, or other
    /// storage errors.
    async fn load_history(&self) -> Result<History, StorageError>;

    /// Replace the stored history.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the history cannot be stored.
    async fn save_history(&self, history: &History) -> Result<(), StorageError>;

    /// Remove the stored history entirely.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the history cannot be removed.
    async fn clear_history(&self) -> Result<(), StorageError>;
}

/// Simple in-memory key-value repository for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Store a raw value under `key`, bypassing encoding.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn put_raw(&self, key: &str, value: impl Into<String>) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Read the raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }
}

#[async_trait]
impl HistoryRepository for InMemoryRepository {
    async fn load_history(&self) -> Result<History, StorageError> {
        let raw = self.get_raw(HISTORY_KEY)?.ok_or(StorageError::NotFound)?;
        decode_history(&raw)
    }

    async fn save_history(&self, history: &History) -> Result<(), StorageError> {
        let encoded = encode_history(history)?;
        self.put_raw(HISTORY_KEY, encoded)
    }

    async fn clear_history(&self) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(HISTORY_KEY);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub history: Arc<dyn HistoryRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let history: Arc<dyn HistoryRepository> = Arc::new(InMemoryRepository::new());
        Self { history }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionId;

    fn id(raw: &str) -> QuestionId {
        QuestionId::new(raw).unwrap()
    }

    #[tokio::test]
    async fn missing_history_is_not_found() {
        let repo = InMemoryRepository::new();
        let err = repo.load_history().await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn round_trips_history() {
        let repo = InMemoryRepository::new();
        let mut history = History::new();
        history.record(id("s1_01"), true);
        history.record(id("s1_02"), false);
        repo.save_history(&history).await.unwrap();

        let loaded = repo.load_history().await.unwrap();
        assert_eq!(loaded, history);
        assert_eq!(
            repo.get_raw(HISTORY_KEY).unwrap().as_deref(),
            Some(r#"{"s1_01":true,"s1_02":false}"#)
        );
    }

    #[tokio::test]
    async fn corrupt_value_is_serialization_error() {
        let repo = InMemoryRepository::new();
        repo.put_raw(HISTORY_KEY, "{not json").unwrap();
        let err = repo.load_history().await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[tokio::test]
    async fn clear_removes_key() {
        let repo = InMemoryRepository::new();
        repo.save_history(&History::new()).await.unwrap();
        repo.clear_history().await.unwrap();
        assert_eq!(repo.get_raw(HISTORY_KEY).unwrap(), None);
    }
}
