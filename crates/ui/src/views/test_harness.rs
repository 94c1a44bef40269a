use std::sync::Arc;

use dioxus::core::{NoOpMutations, ScopeId};
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{QuestionBank, QuestionDraft, QuizMode};
use quiz_core::time::fixed_now;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{Clock, HistoryService, QuizController};
use storage::repository::{HistoryRepository, Storage};

use super::quiz::QuizTestHandles;
use crate::context::{UiApp, build_app_context};
use crate::views::{MenuView, QuizView};
use crate::vm::QuizIntent;

const TEST_SEED: u64 = 7;

#[derive(Clone)]
struct TestApp {
    history: Arc<HistoryService>,
}

impl UiApp for TestApp {
    fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history)
    }

    fn quiz_controller(&self) -> QuizController {
        QuizController::new(Clock::fixed(fixed_now()), self.history())
            .with_rng(StdRng::seed_from_u64(TEST_SEED))
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Menu,
    Quiz(QuizMode),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    quiz_handles: Option<QuizTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    if let Some(handles) = props.quiz_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Menu => rsx! { MenuView {} },
        ViewKind::Quiz(mode) => rsx! { QuizView { mode } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub history: Arc<HistoryService>,
    pub quiz_handles: Option<QuizTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and let pending resources settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        self.drive_async().await;
        self.drive_async().await;
    }

    pub async fn dispatch(&mut self, intent: QuizIntent) {
        let dispatch = self
            .quiz_handles
            .as_ref()
            .expect("quiz handles")
            .dispatch();
        self.dom.in_scope(ScopeId::ROOT, || dispatch.call(intent));
        self.drive_async().await;
        self.drive_async().await;
    }

    /// Fire several intents in the same tick, like rapid clicks.
    pub async fn dispatch_burst(&mut self, intents: &[QuizIntent]) {
        let dispatch = self
            .quiz_handles
            .as_ref()
            .expect("quiz handles")
            .dispatch();
        self.dom.in_scope(ScopeId::ROOT, || {
            for intent in intents {
                dispatch.call(*intent);
            }
        });
        self.drive_async().await;
        self.drive_async().await;
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Bank of `len` questions `q00..`, each with the correct answer at index 1.
pub fn build_bank(len: usize) -> QuestionBank {
    let drafts = (0..len).map(|i| QuestionDraft {
        id: format!("q{i:02}"),
        category: "Life planning".into(),
        prompt: format!("Question <b>{i}</b>"),
        data: None,
        table: None,
        options: vec!["wrong".into(), "right".into(), "also wrong".into()],
        correct: 1,
        explanation: format!("Because {i}."),
        reference: "Sample exam".into(),
    });
    QuestionBank::from_drafts(drafts).expect("valid bank")
}

pub fn setup_view_harness(view: ViewKind, bank_len: usize) -> ViewHarness {
    let storage = Storage::in_memory();
    setup_view_harness_with_repo(view, bank_len, Arc::clone(&storage.history))
}

pub fn setup_view_harness_with_repo(
    view: ViewKind,
    bank_len: usize,
    repo: Arc<dyn HistoryRepository>,
) -> ViewHarness {
    let history = Arc::new(HistoryService::new(repo, Arc::new(build_bank(bank_len))));
    let quiz_handles = match view {
        ViewKind::Quiz(_) => Some(QuizTestHandles::default()),
        ViewKind::Menu => None,
    };

    let app = Arc::new(TestApp {
        history: Arc::clone(&history),
    });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            quiz_handles: quiz_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        history,
        quiz_handles,
    }
}
