//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuizResultError;
use storage::bank::BankLoadError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `HistoryService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HistoryServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the quiz session state machine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions available for a quiz")]
    EmptyPool,
    #[error("a quiz is already running")]
    AlreadyRunning,
    #[error("no quiz is running")]
    NotRunning,
    #[error("quiz has not finished")]
    NotFinished,
    #[error("option {index} is out of range for {len} options")]
    InvalidOption { index: usize, len: usize },
    #[error("current question was already answered")]
    AlreadyAnswered,
    #[error("current question has not been answered yet")]
    NotAnswered,
    #[error(transparent)]
    Result(#[from] QuizResultError),
    #[error(transparent)]
    History(#[from] HistoryServiceError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Bank(#[from] BankLoadError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
