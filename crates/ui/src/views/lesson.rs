use dioxus::prelude::*;
use dioxus_router::Link;

use lesson_core::model::{FlipState, LessonId, LessonSection, SectionFlow, WordId};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    LessonDetailVm, QuizVm, WordCardVm, map_lesson_detail, map_word_cards, start_quiz,
};

#[derive(Clone, Debug, PartialEq)]
struct LessonData {
    detail: LessonDetailVm,
    words: Vec<WordCardVm>,
}

#[component]
pub fn LessonView(lesson_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let lessons = ctx.lessons();
    let locale = ctx.locale();
    let id = LessonId::new(lesson_id.clone());

    let mut flow = use_signal(SectionFlow::new);
    let mut flips = use_signal(FlipState::new);
    let quiz_vm = use_signal(|| None::<QuizVm>);
    let quiz_error = use_signal(|| None::<ViewError>);
    let quiz_busy = use_signal(|| false);

    let resource = use_resource(move || {
        let lessons = lessons.clone();
        let id = LessonId::new(lesson_id.clone());
        async move {
            let detail = lessons.get_lesson(&id).await.map_err(|_| ViewError::Unknown)?;
            let words = lessons
                .lesson_words(&id)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(LessonData {
                detail: map_lesson_detail(&detail, locale),
                words: map_word_cards(&words, locale),
            })
        }
    });

    // Switching into the quiz always lands on a fresh start screen; stale
    // results from an earlier run never survive the tab change.
    let go_to = use_callback(move |section: LessonSection| {
        let mut quiz_vm = quiz_vm;
        let mut quiz_error = quiz_error;
        let leaving = flow.read().current();
        if section == LessonSection::Quiz && leaving != LessonSection::Quiz {
            quiz_vm.set(None);
            quiz_error.set(None);
        }
        if leaving == LessonSection::Vocabulary && section != LessonSection::Vocabulary {
            flips.write().reset();
        }
        flow.write().go_to(section);
    });

    let state = view_state_from_resource(&resource);
    let current = flow.read().current();
    let is_last = flow.read().is_last();
    rsx! {
        div { class: "page lesson-page",
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
                ViewState::Ready(data) => rsx! {
                    header { class: "view-header",
                        h2 { class: "view-title", "{data.detail.title}" }
                    }
                    nav { class: "section-tabs",
                        for section in LessonSection::ALL {
                            button {
                                class: if section == current {
                                    "section-tab section-tab--active"
                                } else {
                                    "section-tab"
                                },
                                r#type: "button",
                                onclick: move |_| go_to.call(section),
                                "{section.title()}"
                            }
                        }
                    }
                    div { class: "section-body",
                        match current {
                            LessonSection::Warmup => rsx! {
                                TextPanel { paragraphs: data.detail.warmup.clone() }
                            },
                            LessonSection::Vocabulary => rsx! {
                                VocabularyPanel { words: data.words.clone(), flips }
                            },
                            LessonSection::Grammar => rsx! {
                                TextPanel { paragraphs: data.detail.grammar.clone() }
                            },
                            LessonSection::Practice => rsx! {
                                div { class: "practice-pointer",
                                    p { "Drill this lesson's vocabulary as flashcards." }
                                    Link {
                                        class: "btn btn-primary",
                                        to: Route::Practice {},
                                        "Open Practice"
                                    }
                                }
                            },
                            LessonSection::Conversation => rsx! {
                                div { class: "conversation",
                                    for bubble in data.detail.conversation.clone() {
                                        div {
                                            class: if bubble.is_left {
                                                "bubble bubble--left"
                                            } else {
                                                "bubble bubble--right"
                                            },
                                            span { class: "bubble-speaker", "{bubble.speaker}" }
                                            p { class: "bubble-text", "{bubble.text}" }
                                        }
                                    }
                                }
                            },
                            LessonSection::Quiz => rsx! {
                                QuizPanel {
                                    lesson_id: id.as_str().to_string(),
                                    quiz_vm,
                                    quiz_error,
                                    quiz_busy,
                                }
                            },
                        }
                    }
                    if !is_last {
                        footer { class: "section-footer",
                            button {
                                class: "btn btn-primary",
                                r#type: "button",
                                onclick: move |_| {
                                    let next = flow.read().current().following();
                                    if let Some(next) = next {
                                        go_to.call(next);
                                    }
                                },
                                "Continue"
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn TextPanel(paragraphs: Vec<String>) -> Element {
    rsx! {
        div { class: "text-panel",
            if paragraphs.is_empty() {
                p { class: "text-panel-empty", "Nothing here yet." }
            } else {
                for paragraph in paragraphs {
                    p { class: "text-panel-paragraph", "{paragraph}" }
                }
            }
        }
    }
}

#[component]
fn VocabularyPanel(words: Vec<WordCardVm>, flips: Signal<FlipState>) -> Element {
    let ctx = use_context::<AppContext>();
    let speech_enabled = ctx.speech().enabled();

    rsx! {
        div { class: "vocab-grid",
            if words.is_empty() {
                p { class: "vocab-empty", "This lesson has no vocabulary." }
            }
            for card in words {
                {
                    let word_id = WordId::new(card.id.clone());
                    let revealed = flips.read().is_revealed(&word_id);
                    let front = card.front.clone();
                    let speech = ctx.speech();
                    let mut flips = flips;
                    rsx! {
                        div {
                            class: if revealed { "vocab-card vocab-card--back" } else { "vocab-card" },
                            onclick: move |_| flips.write().flip(&word_id),
                            if revealed {
                                p { class: "vocab-card-text", "{card.back}" }
                            } else {
                                p { class: "vocab-card-text", "{card.front}" }
                                button {
                                    class: "vocab-speak",
                                    r#type: "button",
                                    disabled: !speech_enabled,
                                    title: if speech_enabled { "Listen" } else { "Speech unavailable" },
                                    onclick: move |evt| {
                                        evt.stop_propagation();
                                        speech.speak(&front, "de-DE", 0.9);
                                    },
                                    "🔊"
                                }
                                if let Some(level) = card.level_label.as_ref() {
                                    span { class: "vocab-card-level", "{level}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

//
// ─── QUIZ PANEL ────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq)]
struct OptionRow {
    label: String,
    selected: bool,
    reveals_correct: bool,
}

#[component]
fn QuizPanel(
    lesson_id: String,
    quiz_vm: Signal<Option<QuizVm>>,
    quiz_error: Signal<Option<ViewError>>,
    quiz_busy: Signal<bool>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();

    // Pull render data out before building the tree so click handlers are
    // free to write the signal.
    enum Panel {
        Start,
        NoQuiz,
        Failed,
        Question {
            position: String,
            question: String,
            options: Vec<OptionRow>,
            locked: bool,
            last: bool,
        },
        Results(crate::vm::QuizResultsVm),
    }

    let panel = {
        let guard = quiz_vm.read();
        match guard.as_ref() {
            Some(vm) => match vm.results() {
                Some(results) => Panel::Results(results),
                None => Panel::Question {
                    position: vm.position_label(),
                    question: vm.question().unwrap_or_default().to_string(),
                    options: vm
                        .options()
                        .into_iter()
                        .map(|label| OptionRow {
                            selected: vm.is_selected(&label),
                            reveals_correct: vm.reveals_as_correct(&label),
                            label,
                        })
                        .collect(),
                    locked: vm.is_locked(),
                    last: vm.is_last_question(),
                },
            },
            None => match quiz_error.read().as_ref() {
                Some(ViewError::Empty) => Panel::NoQuiz,
                Some(ViewError::Unknown) => Panel::Failed,
                None => Panel::Start,
            },
        }
    };

    let start = {
        let quiz_loop = quiz_loop.clone();
        move |_| {
            let quiz_loop = quiz_loop.clone();
            let lesson_id = LessonId::new(lesson_id.clone());
            let mut quiz_vm = quiz_vm;
            let mut quiz_error = quiz_error;
            let mut quiz_busy = quiz_busy;
            spawn(async move {
                quiz_busy.set(true);
                match start_quiz(&quiz_loop, lesson_id).await {
                    Ok(vm) => quiz_vm.set(Some(vm)),
                    Err(err) => quiz_error.set(Some(err)),
                }
                quiz_busy.set(false);
            });
        }
    };

    rsx! {
        div { class: "quiz-panel",
            match panel {
                Panel::Start => rsx! {
                    p { "Ready to check what stuck?" }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: quiz_busy(),
                        onclick: start,
                        "Start Quiz"
                    }
                },
                Panel::NoQuiz => rsx! {
                    p { class: "quiz-empty", "No quiz available for this lesson." }
                },
                Panel::Failed => rsx! {
                    p { "{ViewError::Unknown.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        disabled: quiz_busy(),
                        onclick: start,
                        "Retry"
                    }
                },
                Panel::Question { position, question, options, locked, last } => rsx! {
                    p { class: "quiz-position", "{position}" }
                    h3 { class: "quiz-question", "{question}" }
                    div { class: "quiz-options",
                        for option in options {
                            button {
                                class: if option.reveals_correct {
                                    "quiz-option quiz-option--correct"
                                } else if option.selected && locked {
                                    "quiz-option quiz-option--wrong"
                                } else if option.selected {
                                    "quiz-option quiz-option--selected"
                                } else {
                                    "quiz-option"
                                },
                                r#type: "button",
                                disabled: locked,
                                onclick: {
                                    let label = option.label.clone();
                                    move |_| {
                                        let mut quiz_vm = quiz_vm;
                                        if let Some(vm) = quiz_vm.write().as_mut() {
                                            vm.select(&label);
                                        }
                                    }
                                },
                                "{option.label}"
                            }
                        }
                    }
                    button {
                        class: "btn btn-primary quiz-next",
                        r#type: "button",
                        disabled: !locked,
                        onclick: {
                            let quiz_loop = quiz_loop.clone();
                            move |_| {
                                let quiz_loop = quiz_loop.clone();
                                let mut quiz_vm = quiz_vm;
                                spawn(async move {
                                    let taken = quiz_vm.write().take();
                                    if let Some(mut vm) = taken {
                                        vm.advance(&quiz_loop).await;
                                        quiz_vm.set(Some(vm));
                                    }
                                });
                            }
                        },
                        if last { "Finish" } else { "Next" }
                    }
                },
                Panel::Results(results) => rsx! {
                    h3 { class: "quiz-score", "{results.score} / {results.total} ({results.percent}%)" }
                    if results.passed {
                        p { class: "quiz-verdict quiz-verdict--pass",
                            "You passed! The next lesson is unlocked."
                        }
                    } else {
                        p { class: "quiz-verdict quiz-verdict--fail",
                            "Keep practicing and try again."
                        }
                    }
                    if results.report_failed {
                        p { class: "quiz-toast",
                            "Couldn't save your result. Your score still counts here."
                        }
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: {
                            let quiz_loop = quiz_loop.clone();
                            move |_| {
                                let mut quiz_vm = quiz_vm;
                                if let Some(vm) = quiz_vm.write().as_mut() {
                                    vm.restart(&quiz_loop);
                                }
                            }
                        },
                        "Try Again"
                    }
                },
            }
        }
    }
}
