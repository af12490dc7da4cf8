use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

use api::{InMemoryBackend, LessonRepository};
use lesson_core::model::Locale;
use lesson_core::time::fixed_clock;
use services::{PracticeLoopService, QuizLoopService, SpeechService};

use crate::context::{UiApp, build_app_context};
use crate::views::{HomeView, LessonView, PracticeView};

#[derive(Clone)]
struct TestApp {
    backend: Arc<InMemoryBackend>,
    quiz_loop: Arc<QuizLoopService>,
    practice_loop: Arc<PracticeLoopService>,
}

impl UiApp for TestApp {
    fn locale(&self) -> Locale {
        Locale::En
    }

    fn lessons(&self) -> Arc<dyn LessonRepository> {
        self.backend.clone()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn practice_loop(&self) -> Arc<PracticeLoopService> {
        Arc::clone(&self.practice_loop)
    }

    fn speech(&self) -> SpeechService {
        SpeechService::disabled()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Lesson(String),
    Practice,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
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
    use_context_provider(|| props.view.clone());
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
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Lesson(lesson_id) => rsx! { LessonView { lesson_id } },
        ViewKind::Practice => rsx! { PracticeView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub backend: Arc<InMemoryBackend>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    /// Let pending resources resolve, then flush the resulting renders.
    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
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

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let backend = Arc::new(InMemoryBackend::new());
    let quiz_loop = Arc::new(QuizLoopService::new(
        fixed_clock(),
        backend.clone(),
        backend.clone(),
    ));
    let practice_loop = Arc::new(PracticeLoopService::new(fixed_clock(), backend.clone()));

    let app = Arc::new(TestApp {
        backend: Arc::clone(&backend),
        quiz_loop,
        practice_loop,
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, backend }
}
