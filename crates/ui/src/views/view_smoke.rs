use std::sync::Arc;

use quiz_core::model::{History, QuestionId, QuizMode};
use storage::repository::{HistoryRepository, StorageError};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_repo};
use crate::vm::{QuizIntent, QuizScreenVm};

async fn record(harness: &super::test_harness::ViewHarness, id: &str, correct: bool) {
    let id = QuestionId::new(id).expect("valid id");
    harness
        .history
        .record(&id, correct, &mut QuizScreenVm::default())
        .await
        .expect("record");
}

#[tokio::test(flavor = "current_thread")]
async fn menu_view_smoke_renders_status_badges() {
    let mut harness = setup_view_harness(ViewKind::Menu, 3);
    record(&harness, "q00", true).await;
    record(&harness, "q01", false).await;

    harness.settle().await;
    let html = harness.render();
    for expected in [
        "Random practice",
        "Unanswered first",
        "Weak spots",
        "1 left",
        "1 weak",
        "Progress: 1 / 3 correct",
        "Reset history",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
}

struct FailingHistoryRepo;

#[async_trait::async_trait]
impl HistoryRepository for FailingHistoryRepo {
    async fn load_history(&self) -> Result<History, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn save_history(&self, _history: &History) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn clear_history(&self) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn menu_view_smoke_renders_error_state() {
    let mut harness =
        setup_view_harness_with_repo(ViewKind::Menu, 3, Arc::new(FailingHistoryRepo));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Quiz(QuizMode::New), 3);
    harness.settle().await;
    let html = harness.render();
    for expected in [
        "Unanswered first",
        "1 / 3",
        "Life planning",
        "<b>",
        "1. wrong",
        "2. right",
        "3. also wrong",
        "Quit",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(!html.contains("Next"), "feedback shown too early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_answer_shows_feedback_and_records() {
    let mut harness = setup_view_harness(ViewKind::Quiz(QuizMode::Random), 2);
    harness.settle().await;

    harness.dispatch(QuizIntent::Answer(1)).await;
    let html = harness.render();
    for expected in [
        "Correct!",
        "The answer is 2. right",
        "Source: Sample exam",
        "Next",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(!html.contains("1. wrong"), "options still shown in {html}");

    let history = harness.history.read().await.expect("read history");
    assert_eq!(history.len(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_ignores_clicks_while_answer_is_saving() {
    let mut harness = setup_view_harness(ViewKind::Quiz(QuizMode::Random), 2);
    harness.settle().await;

    harness
        .dispatch_burst(&[QuizIntent::Answer(1), QuizIntent::Answer(0)])
        .await;
    let html = harness.render();
    assert!(html.contains("Correct!"), "first click lost in {html}");
    assert!(!html.contains("Something went wrong"), "error shown in {html}");

    let history = harness.history.read().await.expect("read history");
    assert_eq!(history.len(), 1);
    assert!(history.iter().all(|(_, correct)| correct));
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_final_screen_shows_score() {
    let mut harness = setup_view_harness(ViewKind::Quiz(QuizMode::Random), 2);
    harness.settle().await;

    harness.dispatch(QuizIntent::Answer(0)).await;
    harness.dispatch(QuizIntent::Next).await;
    assert!(harness.render().contains("2 / 2"));
    harness.dispatch(QuizIntent::Answer(1)).await;
    harness.dispatch(QuizIntent::Next).await;

    let html = harness.render();
    assert!(html.contains("Round complete"), "missing final title in {html}");
    assert!(html.contains("1 / 2"), "missing score in {html}");
    assert!(html.contains("Back to menu"), "missing menu button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_weak_without_mistakes_shows_notice() {
    let mut harness = setup_view_harness(ViewKind::Quiz(QuizMode::Weak), 3);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("no weak questions"), "missing notice in {html}");
    assert!(html.contains("1 / 3"), "missing progress in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_empty_bank_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Quiz(QuizMode::Random), 0);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("no questions"), "missing empty message in {html}");
    assert!(html.contains("Back to menu"), "missing menu button in {html}");
}
