//! Collaborators the quiz logic talks to: rendering and user confirmation.
//!
//! Each host environment supplies its own `Presenter`; the desktop UI backs it
//! with a view-model, tests with a recorder.

use quiz_core::model::{MenuStatus, Question, QuestionId, QuizMode, QuizResult};

use crate::sessions::QuizProgress;

/// The question currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub question: Question,
    pub progress: QuizProgress,
    pub mode: QuizMode,
}

/// Outcome of answering the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackView {
    pub question_id: QuestionId,
    pub is_correct: bool,
    pub selected: usize,
    pub correct_index: usize,
    pub correct_option: String,
    pub explanation: String,
    pub reference: String,
}

impl FeedbackView {
    #[must_use]
    pub fn from_answer(question: &Question, selected: usize) -> Self {
        Self {
            question_id: question.id().clone(),
            is_correct: question.is_correct(selected),
            selected,
            correct_index: question.correct_index(),
            correct_option: question.correct_option().to_string(),
            explanation: question.explanation().to_string(),
            reference: question.reference().to_string(),
        }
    }
}

/// Informational messages that interrupt the normal flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Weak mode was chosen but nothing was answered wrong; random questions are used.
    NoWeakQuestions,
    /// History was erased after confirmation.
    HistoryReset,
}

impl Notice {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Notice::NoWeakQuestions => {
                "There are no weak questions yet! Picking random questions instead."
            }
            Notice::HistoryReset => "History has been reset.",
        }
    }
}

/// Rendering boundary for the quiz flow.
pub trait Presenter {
    fn render_question(&mut self, view: &QuestionView);
    fn render_feedback(&mut self, view: &FeedbackView);
    fn render_final(&mut self, result: &QuizResult);
    fn render_menu_status(&mut self, status: &MenuStatus);
    fn notify(&mut self, notice: Notice);
}

/// Yes/no confirmation asked before destructive actions.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// A decision the user already made, e.g. through a modal dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision(bool);

impl Decision {
    pub const YES: Decision = Decision(true);
    pub const NO: Decision = Decision(false);
}

impl Confirm for Decision {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
