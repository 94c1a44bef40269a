use quiz_core::model::{MenuStatus, QuizMode, QuizResult};
use services::{FeedbackView, Notice, Presenter, QuestionView};

use crate::vm::markup::{option_label, sanitize_html};
use crate::vm::time_fmt::format_elapsed;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Answer(usize),
    Next,
    Quit,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Menu,
    Question,
    Feedback,
    Final,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub mode_label: &'static str,
    pub progress_label: String,
    pub category: String,
    pub prompt_html: String,
    /// Sanitized `data` followed by `table`, absent when the question has neither.
    pub aux_html: Option<String>,
    pub option_labels: Vec<String>,
}

impl From<&QuestionView> for QuestionVm {
    fn from(view: &QuestionView) -> Self {
        let question = &view.question;
        Self {
            mode_label: view.mode.label(),
            progress_label: view.progress.label(),
            category: question.category().to_string(),
            prompt_html: sanitize_html(question.prompt()),
            aux_html: question.auxiliary().map(|aux| sanitize_html(&aux)),
            option_labels: question
                .options()
                .iter()
                .enumerate()
                .map(|(index, text)| option_label(index, text))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub is_correct: bool,
    pub selected: usize,
    pub title: &'static str,
    pub answer_line: String,
    pub explanation_html: String,
    pub reference_label: String,
}

impl From<&FeedbackView> for FeedbackVm {
    fn from(view: &FeedbackView) -> Self {
        Self {
            is_correct: view.is_correct,
            selected: view.selected,
            title: if view.is_correct {
                "Correct!"
            } else {
                "Incorrect"
            },
            answer_line: format!(
                "The answer is {}. {}",
                view.correct_index + 1,
                view.correct_option
            ),
            explanation_html: sanitize_html(&view.explanation),
            reference_label: format!("Source: {}", view.reference),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinalVm {
    pub mode: QuizMode,
    pub score_label: String,
    pub elapsed_label: String,
}

impl From<&QuizResult> for FinalVm {
    fn from(result: &QuizResult) -> Self {
        Self {
            mode: result.mode(),
            score_label: format!("{} / {}", result.correct(), result.total()),
            elapsed_label: format!(
                "Time: {}",
                format_elapsed(result.started_at(), result.completed_at())
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuStatusVm {
    pub new_badge: String,
    pub weak_badge: String,
    pub progress_label: String,
}

impl MenuStatusVm {
    /// Badge shown next to a mode button, if that mode has one.
    #[must_use]
    pub fn badge_for(&self, mode: QuizMode) -> Option<&str> {
        match mode {
            QuizMode::Random => None,
            QuizMode::New => Some(&self.new_badge),
            QuizMode::Weak => Some(&self.weak_badge),
        }
    }
}

impl From<&MenuStatus> for MenuStatusVm {
    fn from(status: &MenuStatus) -> Self {
        Self {
            new_badge: format!("{} left", status.unanswered),
            weak_badge: format!("{} weak", status.weak),
            progress_label: format!("Progress: {} / {} correct", status.solved, status.total),
        }
    }
}

/// What the quiz pages show, updated by the quiz flow through [`Presenter`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizScreenVm {
    screen: Screen,
    question: Option<QuestionVm>,
    feedback: Option<FeedbackVm>,
    final_score: Option<FinalVm>,
    status: Option<MenuStatusVm>,
    notice: Option<Notice>,
}

impl QuizScreenVm {
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn question(&self) -> Option<&QuestionVm> {
        self.question.as_ref()
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&FeedbackVm> {
        self.feedback.as_ref()
    }

    #[must_use]
    pub fn final_score(&self) -> Option<&FinalVm> {
        self.final_score.as_ref()
    }

    #[must_use]
    pub fn status(&self) -> Option<&MenuStatusVm> {
        self.status.as_ref()
    }

    #[must_use]
    pub fn notice_message(&self) -> Option<&'static str> {
        self.notice.map(Notice::message)
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

impl Presenter for QuizScreenVm {
    fn render_question(&mut self, view: &QuestionView) {
        self.screen = Screen::Question;
        self.question = Some(QuestionVm::from(view));
        self.feedback = None;
    }

    fn render_feedback(&mut self, view: &FeedbackView) {
        self.screen = Screen::Feedback;
        self.feedback = Some(FeedbackVm::from(view));
        self.notice = None;
    }

    fn render_final(&mut self, result: &QuizResult) {
        self.screen = Screen::Final;
        self.question = None;
        self.feedback = None;
        self.final_score = Some(FinalVm::from(result));
    }

    fn render_menu_status(&mut self, status: &MenuStatus) {
        self.status = Some(MenuStatusVm::from(status));
    }

    fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }
}
