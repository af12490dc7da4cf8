use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::map_lesson_cards;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let lessons = ctx.lessons();
    let locale = ctx.locale();

    let resource = use_resource(move || {
        let lessons = lessons.clone();
        async move {
            let list = lessons
                .list_lessons()
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(map_lesson_cards(&list, locale))
        }
    });

    let state = view_state_from_resource(&resource);
    rsx! {
        div { class: "page home-page",
            header { class: "view-header",
                h2 { class: "view-title", "Lessons" }
                p { class: "view-subtitle", "Pick a lesson to work through, from warmup to quiz." }
            }
            div { class: "view-divider" }
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
                ViewState::Ready(cards) => rsx! {
                    if cards.is_empty() {
                        p { class: "lesson-empty", "No lessons yet. Check back soon." }
                    } else {
                        div { class: "lesson-grid",
                            for card in cards {
                                Link {
                                    class: "lesson-card",
                                    to: Route::Lesson { lesson_id: card.id.clone() },
                                    div { class: "lesson-card-body",
                                        h4 { class: "lesson-card-title", "{card.title}" }
                                        p { class: "lesson-card-description", "{card.description}" }
                                        if let Some(level) = card.level_label.as_ref() {
                                            span { class: "lesson-card-level", "{level}" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
