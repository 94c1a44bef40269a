use std::sync::Arc;

use quiz_core::model::{History, MenuStatus, QuestionBank, QuestionId};
use storage::repository::{HistoryRepository, StorageError};
use tracing::{info, warn};

use crate::error::HistoryServiceError;
use crate::ports::{Confirm, Notice, Presenter};

pub const RESET_PROMPT: &str = "Reset your learning history?";

/// Persistent per-question answer history for one question bank.
#[derive(Clone)]
pub struct HistoryService {
    repo: Arc<dyn HistoryRepository>,
    bank: Arc<QuestionBank>,
}

impl HistoryService {
    #[must_use]
    pub fn new(repo: Arc<dyn HistoryRepository>, bank: Arc<QuestionBank>) -> Self {
        Self { repo, bank }
    }

    #[must_use]
    pub fn bank(&self) -> &Arc<QuestionBank> {
        &self.bank
    }

    /// Load the stored history. Missing or unreadable data yields an empty map.
    ///
    /// # Errors
    ///
    /// Returns `HistoryServiceError::Storage` when the backend itself fails.
    pub async fn read(&self) -> Result<History, HistoryServiceError> {
        match self.repo.load_history().await {
            Ok(history) => Ok(history),
            Err(StorageError::NotFound) => Ok(History::new()),
            Err(StorageError::Serialization(reason)) => {
                warn!(%reason, "stored history is unreadable, starting from empty");
                Ok(History::new())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Store the latest outcome for `id` and refresh the menu counts.
    ///
    /// # Errors
    ///
    /// Returns `HistoryServiceError::Storage` if the history cannot be saved.
    pub async fn record(
        &self,
        id: &QuestionId,
        correct: bool,
        presenter: &mut dyn Presenter,
    ) -> Result<History, HistoryServiceError> {
        let mut history = self.read().await?;
        history.record(id.clone(), correct);
        self.repo.save_history(&history).await?;
        presenter.render_menu_status(&self.compute_status(&history));
        Ok(history)
    }

    /// Erase all history once the user confirms.
    ///
    /// Returns `false` without touching storage when the user declines.
    ///
    /// # Errors
    ///
    /// Returns `HistoryServiceError::Storage` if the history cannot be removed.
    pub async fn clear(
        &self,
        confirm: &dyn Confirm,
        presenter: &mut dyn Presenter,
    ) -> Result<bool, HistoryServiceError> {
        if !confirm.confirm(RESET_PROMPT) {
            return Ok(false);
        }
        self.repo.clear_history().await?;
        info!("answer history reset");
        presenter.render_menu_status(&self.compute_status(&History::new()));
        presenter.notify(Notice::HistoryReset);
        Ok(true)
    }

    /// Current menu counts.
    ///
    /// # Errors
    ///
    /// Returns `HistoryServiceError::Storage` when the backend fails.
    pub async fn status(&self) -> Result<MenuStatus, HistoryServiceError> {
        let history = self.read().await?;
        Ok(self.compute_status(&history))
    }

    /// Recompute menu counts and hand them to the presenter.
    ///
    /// # Errors
    ///
    /// Returns `HistoryServiceError::Storage` when the backend fails.
    pub async fn refresh_status(
        &self,
        presenter: &mut dyn Presenter,
    ) -> Result<MenuStatus, HistoryServiceError> {
        let status = self.status().await?;
        presenter.render_menu_status(&status);
        Ok(status)
    }

    fn compute_status(&self, history: &History) -> MenuStatus {
        MenuStatus::compute(self.bank.questions(), history)
    }
}
