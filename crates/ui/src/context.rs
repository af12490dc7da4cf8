use std::sync::Arc;

use api::LessonRepository;
use lesson_core::model::Locale;
use services::{PracticeLoopService, QuizLoopService, SpeechService};

/// What the composition root (e.g. `crates/app`) must provide to the UI.
pub trait UiApp: Send + Sync {
    fn locale(&self) -> Locale;

    fn lessons(&self) -> Arc<dyn LessonRepository>;
    fn quiz_loop(&self) -> Arc<QuizLoopService>;
    fn practice_loop(&self) -> Arc<PracticeLoopService>;
    fn speech(&self) -> SpeechService;
}

/// Everything views need, resolved once at startup and passed through Dioxus
/// context. Views never reach for globals.
#[derive(Clone)]
pub struct AppContext {
    locale: Locale,

    lessons: Arc<dyn LessonRepository>,
    quiz_loop: Arc<QuizLoopService>,
    practice_loop: Arc<PracticeLoopService>,
    speech: SpeechService,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            locale: app.locale(),
            lessons: app.lessons(),
            quiz_loop: app.quiz_loop(),
            practice_loop: app.practice_loop(),
            speech: app.speech(),
        }
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub fn lessons(&self) -> Arc<dyn LessonRepository> {
        Arc::clone(&self.lessons)
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn practice_loop(&self) -> Arc<PracticeLoopService> {
        Arc::clone(&self.practice_loop)
    }

    #[must_use]
    pub fn speech(&self) -> SpeechService {
        self.speech.clone()
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
