use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use lesson_core::model::{Exercise, LessonDetail, LessonId, LessonOverview, Level, VocabWord};

/// Errors surfaced by backend adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("backend returned status {0}")]
    Status(u16),

    #[error("decode error: {0}")]
    Decode(String),
}

/// Lesson content served by the backend.
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// List lessons for browsing.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the backend is unreachable or misbehaves.
    async fn list_lessons(&self) -> Result<Vec<LessonOverview>, ApiError>;

    /// Fetch one lesson's section content.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the lesson is missing.
    async fn get_lesson(&self, id: &LessonId) -> Result<LessonDetail, ApiError>;

    /// Ordered quiz exercises for a lesson. May legitimately be empty.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport or decode failures.
    async fn lesson_exercises(&self, id: &LessonId) -> Result<Vec<Exercise>, ApiError>;

    /// Ordered vocabulary for a lesson. May legitimately be empty.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport or decode failures.
    async fn lesson_words(&self, id: &LessonId) -> Result<Vec<VocabWord>, ApiError>;
}

/// Flashcard source for practice sessions.
#[async_trait]
pub trait WordRepository: Send + Sync {
    /// Fetch up to `count` random words, optionally filtered by level.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for transport or decode failures.
    async fn random_words(
        &self,
        count: u32,
        level: Option<Level>,
    ) -> Result<Vec<VocabWord>, ApiError>;
}

/// Completion reporting. The caller decides how to react to failure; this
/// trait only moves the score.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// Report the final quiz percentage for a lesson.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the report does not reach the backend.
    async fn post_completion(&self, lesson: &LessonId, score_percent: u8) -> Result<(), ApiError>;
}

/// In-memory backend for tests and offline demo runs.
///
/// Completion posts are recorded so tests can assert on them, and can be made
/// to fail on demand to exercise the fire-and-forget path.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    lessons: Arc<Mutex<Vec<LessonDetail>>>,
    exercises: Arc<Mutex<HashMap<LessonId, Vec<Exercise>>>>,
    words: Arc<Mutex<HashMap<LessonId, Vec<VocabWord>>>>,
    pool: Arc<Mutex<Vec<VocabWord>>>,
    completions: Arc<Mutex<Vec<(LessonId, u8)>>>,
    fail_completions: Arc<AtomicBool>,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_lesson(&self, lesson: LessonDetail) {
        self.lessons
            .lock()
            .expect("lesson lock poisoned")
            .push(lesson);
    }

    pub fn set_exercises(&self, lesson: LessonId, exercises: Vec<Exercise>) {
        self.exercises
            .lock()
            .expect("exercise lock poisoned")
            .insert(lesson, exercises);
    }

    pub fn set_words(&self, lesson: LessonId, words: Vec<VocabWord>) {
        self.words
            .lock()
            .expect("word lock poisoned")
            .insert(lesson, words);
    }

    /// Seed the pool served by `random_words`.
    pub fn set_word_pool(&self, words: Vec<VocabWord>) {
        *self.pool.lock().expect("pool lock poisoned") = words;
    }

    /// Make subsequent completion posts fail with a connection error.
    pub fn fail_completions(&self, fail: bool) {
        self.fail_completions.store(fail, Ordering::SeqCst);
    }

    /// Completion posts recorded so far, in arrival order.
    #[must_use]
    pub fn recorded_completions(&self) -> Vec<(LessonId, u8)> {
        self.completions
            .lock()
            .expect("completion lock poisoned")
            .clone()
    }
}

#[async_trait]
impl LessonRepository for InMemoryBackend {
    async fn list_lessons(&self) -> Result<Vec<LessonOverview>, ApiError> {
        let lessons = self.lessons.lock().expect("lesson lock poisoned");
        Ok(lessons
            .iter()
            .map(|lesson| lesson.overview().clone())
            .collect())
    }

    async fn get_lesson(&self, id: &LessonId) -> Result<LessonDetail, ApiError> {
        let lessons = self.lessons.lock().expect("lesson lock poisoned");
        lessons
            .iter()
            .find(|lesson| lesson.id() == id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    async fn lesson_exercises(&self, id: &LessonId) -> Result<Vec<Exercise>, ApiError> {
        let exercises = self.exercises.lock().expect("exercise lock poisoned");
        Ok(exercises.get(id).cloned().unwrap_or_default())
    }

    async fn lesson_words(&self, id: &LessonId) -> Result<Vec<VocabWord>, ApiError> {
        let words = self.words.lock().expect("word lock poisoned");
        Ok(words.get(id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl WordRepository for InMemoryBackend {
    async fn random_words(
        &self,
        count: u32,
        level: Option<Level>,
    ) -> Result<Vec<VocabWord>, ApiError> {
        let pool = self.pool.lock().expect("pool lock poisoned");
        let filtered = pool
            .iter()
            .filter(|word| level.is_none() || word.level() == level)
            .take(count as usize)
            .cloned()
            .collect();
        Ok(filtered)
    }
}

#[async_trait]
impl ProgressSink for InMemoryBackend {
    async fn post_completion(&self, lesson: &LessonId, score_percent: u8) -> Result<(), ApiError> {
        if self.fail_completions.load(Ordering::SeqCst) {
            return Err(ApiError::Connection("completion post refused".into()));
        }
        self.completions
            .lock()
            .expect("completion lock poisoned")
            .push((lesson.clone(), score_percent));
        Ok(())
    }
}
