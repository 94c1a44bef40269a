use std::sync::Arc;

use services::{HistoryService, QuizController};

pub trait UiApp: Send + Sync {
    fn history(&self) -> Arc<HistoryService>;

    /// A fresh, idle controller for one quiz run.
    fn quiz_controller(&self) -> QuizController;
}

#[derive(Clone)]
pub struct AppContext {
    app: Arc<dyn UiApp>,
    history: Arc<HistoryService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            app: Arc::clone(app),
            history: app.history(),
        }
    }

    #[must_use]
    pub fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history)
    }

    #[must_use]
    pub fn quiz_controller(&self) -> QuizController {
        self.app.quiz_controller()
    }
}

// Provided by the composition root in `crates/app`.

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
