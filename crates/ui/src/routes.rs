use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{HomeView, LessonView, PracticeView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/lesson/:lesson_id", LessonView)] Lesson { lesson_id: String },
        #[route("/practice", PracticeView)] Practice {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Deutsch Lernen" }
            ul {
                li { Link { to: Route::Home {}, "Lessons" } }
                li { Link { to: Route::Practice {}, "Practice" } }
            }
        }
    }
}
