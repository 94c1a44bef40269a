use dioxus::prelude::*;
use dioxus_router::use_navigator;
use quiz_core::model::QuizMode;
use services::{ABORT_PROMPT, Decision, QuizController, QuizError, QuizPhase};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizIntent, QuizScreenVm, Screen};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LastAction {
    Start,
    Intent(QuizIntent),
}

#[component]
pub fn QuizView(mode: QuizMode) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    let error = use_signal(|| None::<ViewError>);
    let controller = use_signal(|| None::<QuizController>);
    let screen = use_signal(QuizScreenVm::default);
    let last_action = use_signal(|| None::<LastAction>);
    let in_flight = use_signal(|| false);
    let mut quit_open = use_signal(|| false);

    let resource = use_resource(move || {
        let ctx = ctx.clone();
        let mut error = error;
        let mut controller = controller;
        let mut screen = screen;
        let mut last_action = last_action;

        async move {
            last_action.set(Some(LastAction::Start));
            let mut quiz = ctx.quiz_controller();
            let mut next = QuizScreenVm::default();
            match quiz.start(mode, &mut next).await {
                Ok(()) => {}
                Err(QuizError::EmptyPool) => return Err(ViewError::EmptySession),
                Err(_) => return Err(ViewError::Unknown),
            }
            controller.set(Some(quiz));
            screen.set(next);
            error.set(None);
            Ok::<_, ViewError>(())
        }
    });

    let dispatch_intent = use_callback(move |intent: QuizIntent| {
        let mut error = error;
        let mut controller = controller;
        let mut screen = screen;
        let mut last_action = last_action;
        let mut quit_open = quit_open;
        let mut in_flight = in_flight;

        // The controller is out of its signal until the task finishes.
        if *in_flight.peek() {
            return;
        }
        in_flight.set(true);

        spawn(async move {
            last_action.set(Some(LastAction::Intent(intent)));
            let taken = controller.write().take();
            let Some(mut quiz) = taken else {
                in_flight.set(false);
                error.set(Some(ViewError::Unknown));
                return;
            };

            let mut next = screen.peek().clone();
            let result = match intent {
                QuizIntent::Answer(index) => quiz.answer(index, &mut next).await.map(|_| false),
                QuizIntent::Next => quiz.advance(&mut next).await.map(|_| false),
                QuizIntent::Quit => quiz.abort(&Decision::YES, &mut next).await,
            };

            // Always put the controller back so the page stays usable after errors.
            controller.set(Some(quiz));
            in_flight.set(false);

            match result {
                Ok(left) => {
                    screen.set(next);
                    error.set(None);
                    if left {
                        quit_open.set(false);
                        let _ = navigator.push(Route::Menu {});
                    }
                }
                Err(_) => error.set(Some(ViewError::Unknown)),
            }
        });
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent);
            }
        }
    }

    let retry_action = use_callback(move |()| match last_action() {
        Some(LastAction::Start) | None => {
            let mut resource = resource;
            resource.restart();
        }
        Some(LastAction::Intent(intent)) => dispatch_intent.call(intent),
    });

    let on_quit = use_callback(move |()| {
        let running = in_flight()
            || controller
                .read()
                .as_ref()
                .is_some_and(|quiz| quiz.phase() == QuizPhase::Running);
        if running {
            quit_open.set(true);
        } else {
            let _ = navigator.push(Route::Menu {});
        }
    });

    let back_to_menu = use_callback(move |()| {
        let mut controller = controller;
        if let Some(quiz) = controller.write().as_mut() {
            quiz.reset();
        }
        let _ = navigator.push(Route::Menu {});
    });

    let state = view_state_from_resource(resource);
    let vm = screen.read().clone();
    let progress_label = vm
        .question()
        .map(|question| question.progress_label.clone())
        .unwrap_or_default();

    rsx! {
        div { class: "page quiz-page", id: "quiz-root",
            header { class: "quiz-header",
                span { class: "quiz-mode", "{mode.label()}" }
                span { class: "quiz-progress", id: "quiz-progress", "{progress_label}" }
                if vm.screen() != Screen::Final {
                    button {
                        class: "quiz-quit",
                        id: "quiz-quit",
                        r#type: "button",
                        onclick: move |_| on_quit.call(()),
                        "Quit"
                    }
                }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(ViewError::EmptySession) => rsx! {
                    p { "{ViewError::EmptySession.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let _ = navigator.push(Route::Menu {});
                        },
                        "Back to menu"
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| retry_action.call(()),
                        "Retry"
                    }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(err) = *error.read() {
                        p { class: "quiz-error", "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| retry_action.call(()),
                            "Retry"
                        }
                    }
                    if let Some(message) = vm.notice_message() {
                        div { class: "notice", "{message}" }
                    }
                    QuizBody {
                        vm: vm.clone(),
                        busy: in_flight(),
                        on_intent: dispatch_intent,
                        on_restart: move |()| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        on_menu: back_to_menu,
                    }
                },
            }
            if quit_open() {
                div {
                    class: "modal-overlay",
                    onclick: move |_| quit_open.set(false),
                    div {
                        class: "modal",
                        role: "dialog",
                        aria_modal: "true",
                        onclick: move |evt| evt.stop_propagation(),
                        h3 { class: "modal-title", "{ABORT_PROMPT}" }
                        p { class: "modal-body", "Answers given so far stay in your history." }
                        div { class: "modal-actions",
                            button {
                                class: "btn modal-cancel",
                                r#type: "button",
                                onclick: move |_| quit_open.set(false),
                                "Keep going"
                            }
                            button {
                                class: "btn modal-confirm",
                                id: "quiz-quit-confirm",
                                r#type: "button",
                                disabled: in_flight(),
                                onclick: move |_| dispatch_intent.call(QuizIntent::Quit),
                                "Quit"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn QuizBody(
    vm: QuizScreenVm,
    busy: bool,
    on_intent: EventHandler<QuizIntent>,
    on_restart: EventHandler<()>,
    on_menu: EventHandler<()>,
) -> Element {
    match vm.screen() {
        Screen::Menu => rsx! {},
        Screen::Final => {
            let Some(final_score) = vm.final_score().cloned() else {
                return rsx! {};
            };
            rsx! {
                div { class: "final-screen",
                    h3 { class: "final-title", "Round complete" }
                    p { class: "final-score", id: "final-score", "{final_score.score_label}" }
                    p { class: "final-elapsed", "{final_score.elapsed_label}" }
                    div { class: "final-actions",
                        button {
                            class: "btn btn-primary",
                            id: "final-again",
                            r#type: "button",
                            onclick: move |_| on_restart.call(()),
                            "Play again"
                        }
                        button {
                            class: "btn btn-secondary",
                            id: "final-menu",
                            r#type: "button",
                            onclick: move |_| on_menu.call(()),
                            "Back to menu"
                        }
                    }
                }
            }
        }
        Screen::Question | Screen::Feedback => {
            let Some(question) = vm.question().cloned() else {
                return rsx! {};
            };
            let feedback = vm.feedback().cloned();
            let result_class = match &feedback {
                Some(feedback) if feedback.is_correct => "result-area correct-msg",
                _ => "result-area incorrect-msg",
            };
            rsx! {
                div { class: "quiz-question",
                    p { class: "quiz-category", "{question.category}" }
                    div { class: "quiz-text", dangerous_inner_html: "{question.prompt_html}" }
                    if let Some(aux) = question.aux_html.as_ref() {
                        div { class: "quiz-data", dangerous_inner_html: "{aux}" }
                    }
                }
                if let Some(feedback) = feedback {
                    div {
                        class: "{result_class}",
                        h3 { class: "result-title", "{feedback.title}" }
                        p { class: "result-answer", strong { "{feedback.answer_line}" } }
                        div { class: "result-explanation", dangerous_inner_html: "{feedback.explanation_html}" }
                        p { class: "result-ref", "{feedback.reference_label}" }
                        button {
                            class: "btn btn-primary next-btn",
                            id: "quiz-next",
                            r#type: "button",
                            disabled: busy,
                            onclick: move |_| on_intent.call(QuizIntent::Next),
                            "Next"
                        }
                    }
                } else {
                    div { class: "options-area",
                        for (index, label) in question.option_labels.iter().enumerate() {
                            button {
                                key: "{index}",
                                class: "option-btn",
                                id: "quiz-option-{index}",
                                r#type: "button",
                                disabled: busy,
                                onclick: move |_| on_intent.call(QuizIntent::Answer(index)),
                                "{label}"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }
}
