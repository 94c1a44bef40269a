use std::sync::Arc;

use dioxus::prelude::*;
use dioxus_router::use_navigator;
use quiz_core::model::QuizMode;
use services::{Decision, RESET_PROMPT};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{MenuStatusVm, QuizScreenVm};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ResetState {
    Closed,
    Open,
    Resetting,
    Error(ViewError),
}

#[component]
pub fn MenuView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let history = ctx.history();
    let mut screen = use_signal(QuizScreenVm::default);
    let mut reset_state = use_signal(|| ResetState::Closed);

    let history_for_resource = Arc::clone(&history);
    let resource = use_resource(move || {
        let history = Arc::clone(&history_for_resource);
        async move {
            let status = history.status().await.map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(MenuStatusVm::from(&status))
        }
    });

    let state = view_state_from_resource(resource);
    let vm = screen.read().clone();

    rsx! {
        div { class: "page menu-page",
            header { class: "view-header",
                h2 { class: "view-title", "Choose a mode" }
                p { class: "view-subtitle", "Up to 20 questions per round." }
            }
            div { class: "view-divider" }
            if let Some(message) = vm.notice_message() {
                div { class: "notice",
                    span { "{message}" }
                    button {
                        class: "notice-dismiss",
                        r#type: "button",
                        onclick: move |_| screen.write().dismiss_notice(),
                        "×"
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
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(loaded) => {
                    // A status pushed by the quiz flow (e.g. after a reset) wins over the loaded one.
                    let status = vm.status().cloned().unwrap_or(loaded);
                    let mode_buttons = QuizMode::ALL.into_iter().map(|mode| {
                        let badge = status.badge_for(mode).map(str::to_string);
                        rsx! {
                            button {
                                key: "{mode}",
                                class: "mode-btn mode-btn--{mode}",
                                id: "mode-{mode}",
                                r#type: "button",
                                onclick: move |_| {
                                    let _ = navigator.push(Route::Quiz { mode });
                                },
                                span { class: "mode-btn-label", "{mode.label()}" }
                                if let Some(badge) = badge {
                                    span { class: "mode-badge", "{badge}" }
                                }
                            }
                        }
                    });
                    rsx! {
                        div { class: "mode-list", {mode_buttons} }
                        p { class: "history-status", "{status.progress_label}" }
                        button {
                            class: "btn btn-danger reset-btn",
                            id: "menu-reset",
                            r#type: "button",
                            onclick: move |_| reset_state.set(ResetState::Open),
                            "Reset history"
                        }
                    }
                }
            }
            if reset_state() != ResetState::Closed {
                div {
                    class: "modal-overlay",
                    onclick: move |_| reset_state.set(ResetState::Closed),
                    div {
                        class: "modal",
                        role: "dialog",
                        aria_modal: "true",
                        onclick: move |evt| evt.stop_propagation(),
                        h3 { class: "modal-title", "{RESET_PROMPT}" }
                        p { class: "modal-body",
                            "Every recorded answer is forgotten. This cannot be undone."
                        }
                        if let ResetState::Error(err) = reset_state() {
                            p { class: "modal-error", "{err.message()}" }
                        }
                        div { class: "modal-actions",
                            button {
                                class: "btn modal-cancel",
                                r#type: "button",
                                onclick: move |_| reset_state.set(ResetState::Closed),
                                "Cancel"
                            }
                            button {
                                class: "btn modal-confirm",
                                id: "menu-reset-confirm",
                                r#type: "button",
                                disabled: reset_state() == ResetState::Resetting,
                                onclick: move |_| {
                                    let history = Arc::clone(&history);
                                    spawn(async move {
                                        reset_state.set(ResetState::Resetting);
                                        let mut next = screen.peek().clone();
                                        match history.clear(&Decision::YES, &mut next).await {
                                            Ok(_) => {
                                                screen.set(next);
                                                reset_state.set(ResetState::Closed);
                                            }
                                            Err(_) => {
                                                reset_state.set(ResetState::Error(ViewError::Unknown));
                                            }
                                        }
                                    });
                                },
                                "Reset"
                            }
                        }
                    }
                }
            }
        }
    }
}
