use std::sync::Arc;

use quiz_core::model::QuestionBank;
use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::history_service::HistoryService;
use crate::sessions::QuizController;

/// Assembles app-facing services around one question bank.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    history: Arc<HistoryService>,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: &Storage, bank: QuestionBank, clock: Clock) -> Self {
        let history = Arc::new(HistoryService::new(
            Arc::clone(&storage.history),
            Arc::new(bank),
        ));
        Self { clock, history }
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        bank: QuestionBank,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::new(&storage, bank, clock))
    }

    #[must_use]
    pub fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history)
    }

    /// A fresh, idle quiz controller sharing this history.
    #[must_use]
    pub fn controller(&self) -> QuizController {
        QuizController::new(self.clock, self.history())
    }
}
