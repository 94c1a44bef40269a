#![allow(dead_code)]

use std::sync::Arc;

use quiz_core::model::{MenuStatus, QuestionBank, QuestionDraft, QuizResult};
use services::{FeedbackView, Notice, Presenter, QuestionView};

/// Everything the quiz flow rendered, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Question(QuestionView),
    Feedback(FeedbackView),
    Final(QuizResult),
    MenuStatus(MenuStatus),
    Notice(Notice),
}

#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub events: Vec<Rendered>,
}

impl RecordingPresenter {
    pub fn questions(&self) -> Vec<&QuestionView> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Rendered::Question(view) => Some(view),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Rendered::Notice(notice) => Some(*notice),
                _ => None,
            })
            .collect()
    }

    pub fn last_status(&self) -> Option<MenuStatus> {
        self.events.iter().rev().find_map(|e| match e {
            Rendered::MenuStatus(status) => Some(*status),
            _ => None,
        })
    }

    pub fn last_question(&self) -> Option<&QuestionView> {
        self.questions().into_iter().last()
    }
}

impl Presenter for RecordingPresenter {
    fn render_question(&mut self, view: &QuestionView) {
        self.events.push(Rendered::Question(view.clone()));
    }

    fn render_feedback(&mut self, view: &FeedbackView) {
        self.events.push(Rendered::Feedback(view.clone()));
    }

    fn render_final(&mut self, result: &QuizResult) {
        self.events.push(Rendered::Final(result.clone()));
    }

    fn render_menu_status(&mut self, status: &MenuStatus) {
        self.events.push(Rendered::MenuStatus(*status));
    }

    fn notify(&mut self, notice: Notice) {
        self.events.push(Rendered::Notice(notice));
    }
}

/// Bank of `len` questions `q00..`, each with the correct answer at index 1.
pub fn build_bank(len: usize) -> QuestionBank {
    let drafts = (0..len).map(|i| QuestionDraft {
        id: format!("q{i:02}"),
        category: "Life planning".into(),
        prompt: format!("Question {i}"),
        data: None,
        table: None,
        options: vec!["wrong".into(), "right".into(), "also wrong".into()],
        correct: 1,
        explanation: format!("Because {i}."),
        reference: "Sample exam".into(),
    });
    QuestionBank::from_drafts(drafts).expect("valid bank")
}

pub fn shared_bank(len: usize) -> Arc<QuestionBank> {
    Arc::new(build_bank(len))
}
