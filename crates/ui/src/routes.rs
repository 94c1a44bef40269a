use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};
use quiz_core::model::QuizMode;

use crate::views::{MenuView, QuizView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", MenuView)] Menu {},
        #[route("/quiz/:mode", QuizView)] Quiz { mode: QuizMode },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "app-header",
                Link { class: "app-title", to: Route::Menu {}, "Quiz Trainer" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
