use std::sync::Arc;

use quiz_core::model::{QuizMode, QuizResult};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use super::plan::PoolSelector;
use super::service::{Advance, AnsweredQuestion, QuizSession};
use crate::error::QuizError;
use crate::history_service::HistoryService;
use crate::ports::{Confirm, FeedbackView, Presenter, QuestionView};
use crate::Clock;

pub const ABORT_PROMPT: &str = "Quit the quiz and return to the menu?";

/// Where the quiz flow currently is.
#[derive(Debug)]
pub enum QuizState {
    Idle,
    Running(QuizSession),
    Finished(QuizResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Idle,
    Running,
    Finished,
}

impl QuizState {
    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        match self {
            QuizState::Idle => QuizPhase::Idle,
            QuizState::Running(_) => QuizPhase::Running,
            QuizState::Finished(_) => QuizPhase::Finished,
        }
    }
}

/// Owns the quiz state machine and drives the presenter through it.
///
/// `Idle → Running → Finished`, with `Running → Idle` on a confirmed abort.
pub struct QuizController {
    clock: Clock,
    history: Arc<HistoryService>,
    rng: StdRng,
    state: QuizState,
}

impl QuizController {
    #[must_use]
    pub fn new(clock: Clock, history: Arc<HistoryService>) -> Self {
        Self {
            clock,
            history,
            rng: StdRng::from_os_rng(),
            state: QuizState::Idle,
        }
    }

    /// Use a fixed random source, e.g. a seeded `StdRng` in tests.
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    #[must_use]
    pub fn state(&self) -> &QuizState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.state.phase()
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        match &self.state {
            QuizState::Running(session) => Some(session),
            _ => None,
        }
    }

    #[must_use]
    pub fn history(&self) -> &Arc<HistoryService> {
        &self.history
    }

    /// Build a pool for `mode` and show its first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyRunning` while a quiz is in progress,
    /// `QuizError::EmptyPool` if the bank has no questions, or history errors.
    pub async fn start(
        &mut self,
        mode: QuizMode,
        presenter: &mut dyn Presenter,
    ) -> Result<(), QuizError> {
        if matches!(self.state, QuizState::Running(_)) {
            return Err(QuizError::AlreadyRunning);
        }

        let history = self.history.read().await?;
        let plan = PoolSelector::new(self.history.bank().questions()).select(
            mode,
            &history,
            &mut self.rng,
        );
        let notice = plan.notice;
        let session = QuizSession::new(mode, plan.questions, self.clock.now())?;
        info!(%mode, questions = session.total(), "quiz started");

        if let Some(notice) = notice {
            presenter.notify(notice);
        }
        presenter.render_question(&question_view(&session)?);
        self.state = QuizState::Running(session);
        Ok(())
    }

    /// Answer the current question, persist the outcome, and show feedback.
    ///
    /// The quiz stays on the same question until [`advance`](Self::advance).
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotRunning` outside a quiz, `QuizError::AlreadyAnswered`,
    /// `QuizError::InvalidOption`, or history errors.
    pub async fn answer(
        &mut self,
        selected: usize,
        presenter: &mut dyn Presenter,
    ) -> Result<AnsweredQuestion, QuizError> {
        let QuizState::Running(session) = &mut self.state else {
            return Err(QuizError::NotRunning);
        };

        let answer = session.grade(selected)?;
        self.history
            .record(&answer.question_id, answer.is_correct, presenter)
            .await?;
        session.apply(answer.clone());

        let question = session.current_question().ok_or(QuizError::NotRunning)?;
        presenter.render_feedback(&FeedbackView::from_answer(question, selected));
        Ok(answer)
    }

    /// Move to the next question, or finish the quiz after the last one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotRunning` outside a quiz, `QuizError::NotAnswered`
    /// if the current question has no answer, or history errors.
    pub async fn advance(&mut self, presenter: &mut dyn Presenter) -> Result<QuizPhase, QuizError> {
        let QuizState::Running(session) = &mut self.state else {
            return Err(QuizError::NotRunning);
        };

        match session.advance()? {
            Advance::Next => {
                presenter.render_question(&question_view(session)?);
                Ok(QuizPhase::Running)
            }
            Advance::Finished => {
                let result = session.finish(self.clock.now())?;
                info!(
                    mode = %result.mode(),
                    correct = result.correct(),
                    total = result.total(),
                    "quiz finished"
                );
                presenter.render_final(&result);
                self.state = QuizState::Finished(result);
                self.history.refresh_status(presenter).await?;
                Ok(QuizPhase::Finished)
            }
        }
    }

    /// Leave a running quiz after confirmation. Nothing further is recorded.
    ///
    /// Returns `false` if the user declined.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotRunning` outside a quiz, or history errors.
    pub async fn abort(
        &mut self,
        confirm: &dyn Confirm,
        presenter: &mut dyn Presenter,
    ) -> Result<bool, QuizError> {
        if !matches!(self.state, QuizState::Running(_)) {
            return Err(QuizError::NotRunning);
        }
        if !confirm.confirm(ABORT_PROMPT) {
            return Ok(false);
        }
        self.state = QuizState::Idle;
        info!("quiz aborted");
        self.history.refresh_status(presenter).await?;
        Ok(true)
    }

    /// Return to the menu after a finished quiz.
    pub fn reset(&mut self) {
        if matches!(self.state, QuizState::Finished(_)) {
            self.state = QuizState::Idle;
        }
    }

    /// Final score of the finished quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotFinished` unless the quiz has finished.
    pub fn result(&self) -> Result<&QuizResult, QuizError> {
        match &self.state {
            QuizState::Finished(result) => Ok(result),
            _ => Err(QuizError::NotFinished),
        }
    }
}

fn question_view(session: &QuizSession) -> Result<QuestionView, QuizError> {
    let question = session.current_question().ok_or(QuizError::NotRunning)?;
    Ok(QuestionView {
        question: question.clone(),
        progress: session.progress(),
        mode: session.mode(),
    })
}
