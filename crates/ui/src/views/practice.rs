use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{PracticeIntent, PracticeVm, start_practice};

const PRACTICE_DECK_SIZE: u32 = 20;

/// Keyboard contract for the flashcard run: space flips, arrows navigate,
/// "1" marks known, "2" marks unknown. Everything else falls through.
fn practice_key_intent(key: &Key) -> Option<PracticeIntent> {
    match key {
        Key::Character(value) if value == " " => Some(PracticeIntent::Flip),
        Key::Character(value) if value == "1" => Some(PracticeIntent::MarkKnown),
        Key::Character(value) if value == "2" => Some(PracticeIntent::MarkUnknown),
        Key::ArrowRight => Some(PracticeIntent::Next),
        Key::ArrowLeft => Some(PracticeIntent::Previous),
        _ => None,
    }
}

#[component]
pub fn PracticeView() -> Element {
    let ctx = use_context::<AppContext>();
    let locale = ctx.locale();
    let practice_loop = ctx.practice_loop();
    let speech = ctx.speech();
    let speech_enabled = speech.enabled();

    let vm = use_signal(|| None::<PracticeVm>);
    let error = use_signal(|| None::<ViewError>);
    let busy = use_signal(|| false);

    let start = use_callback({
        let practice_loop = practice_loop.clone();
        move |_: MouseEvent| {
            let practice_loop = practice_loop.clone();
            let mut vm = vm;
            let mut error = error;
            let mut busy = busy;
            spawn(async move {
                busy.set(true);
                error.set(None);
                match start_practice(&practice_loop, PRACTICE_DECK_SIZE, None).await {
                    Ok(session) => vm.set(Some(session)),
                    Err(err) => error.set(Some(err)),
                }
                busy.set(false);
            });
        }
    });

    let on_key = use_callback(move |evt: KeyboardEvent| {
        if !evt.data.modifiers().is_empty() {
            return;
        }
        let Some(intent) = practice_key_intent(&evt.data.key()) else {
            return;
        };
        let mut vm = vm;
        let mut guard = vm.write();
        // With no session or a finished one, keys are inert.
        let Some(session) = guard.as_mut() else {
            return;
        };
        if session.is_complete() {
            return;
        }
        evt.prevent_default();
        session.apply(intent);
    });

    // Render data is pulled out first so handlers can take the write lock.
    let card = vm.read().as_ref().and_then(|session| session.current_card(locale));
    let progress = vm.read().as_ref().map(|session| session.progress());
    let flipped = vm.read().as_ref().is_some_and(PracticeVm::is_flipped);
    let can_repeat = vm.read().as_ref().is_some_and(PracticeVm::can_repeat_unknown);
    let completed = progress.as_ref().is_some_and(|progress| progress.is_complete);

    rsx! {
        div {
            class: "page practice-page",
            tabindex: "0",
            onkeydown: move |evt| on_key.call(evt),
            header { class: "view-header",
                h2 { class: "view-title", "Practice" }
                p { class: "view-subtitle",
                    "Space flips the card, arrows move, 1 marks known, 2 marks unknown."
                }
            }
            div { class: "view-divider" }
            if let Some(err) = error.read().as_ref() {
                p { class: "practice-error", "{err.message()}" }
            }
            if progress.is_none() {
                div { class: "practice-start",
                    p { "Grab a fresh stack of words and see how many you know." }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: busy(),
                        onclick: move |evt| start.call(evt),
                        "Start Practice"
                    }
                }
            }
            if let Some(progress) = progress {
                if completed {
                    div { class: "practice-summary",
                        h3 { "Round complete" }
                        p { "Known: {progress.known} · Unknown: {progress.unknown}" }
                        div { class: "practice-summary-actions",
                            if can_repeat {
                                button {
                                    class: "btn btn-primary",
                                    r#type: "button",
                                    onclick: {
                                        let practice_loop = practice_loop.clone();
                                        move |_| {
                                            let mut vm = vm;
                                            let mut error = error;
                                            let outcome = vm
                                                .write()
                                                .as_mut()
                                                .map(|session| session.repeat_unknown(&practice_loop));
                                            if let Some(Err(err)) = outcome {
                                                error.set(Some(err));
                                            }
                                        }
                                    },
                                    "Repeat Unknown ({progress.unknown})"
                                }
                            }
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                disabled: busy(),
                                onclick: move |evt| start.call(evt),
                                "New Round"
                            }
                        }
                    }
                } else {
                    p { class: "practice-counter",
                        "Card {progress.index + 1} of {progress.total} · Known {progress.known} · Unknown {progress.unknown}"
                    }
                    if let Some(card) = card {
                        div {
                            class: if flipped { "practice-card practice-card--back" } else { "practice-card" },
                            onclick: move |_| {
                                let mut vm = vm;
                                if let Some(session) = vm.write().as_mut() {
                                    session.apply(PracticeIntent::Flip);
                                }
                            },
                            if flipped {
                                p { class: "practice-card-text", "{card.back}" }
                            } else {
                                p { class: "practice-card-text", "{card.front}" }
                                button {
                                    class: "vocab-speak",
                                    r#type: "button",
                                    disabled: !speech_enabled,
                                    title: if speech_enabled { "Listen" } else { "Speech unavailable" },
                                    onclick: {
                                        let speech = speech.clone();
                                        let front = card.front.clone();
                                        move |evt: MouseEvent| {
                                            evt.stop_propagation();
                                            speech.speak(&front, "de-DE", 0.9);
                                        }
                                    },
                                    "🔊"
                                }
                            }
                        }
                        div { class: "practice-actions",
                            button {
                                class: "btn practice-mark practice-mark--known",
                                r#type: "button",
                                onclick: move |_| {
                                    let mut vm = vm;
                                    if let Some(session) = vm.write().as_mut() {
                                        session.apply(PracticeIntent::MarkKnown);
                                    }
                                },
                                "I know this"
                            }
                            button {
                                class: "btn practice-mark practice-mark--unknown",
                                r#type: "button",
                                onclick: move |_| {
                                    let mut vm = vm;
                                    if let Some(session) = vm.write().as_mut() {
                                        session.apply(PracticeIntent::MarkUnknown);
                                    }
                                },
                                "Still learning"
                            }
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                onclick: {
                                    let practice_loop = practice_loop.clone();
                                    move |_| {
                                        let mut vm = vm;
                                        if let Some(session) = vm.write().as_mut() {
                                            session.shuffle(&practice_loop);
                                        }
                                    }
                                },
                                "Shuffle"
                            }
                        }
                    }
                }
            }
        }
    }
}
