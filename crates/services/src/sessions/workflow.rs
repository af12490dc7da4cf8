use std::sync::Arc;

use tracing::warn;

use api::{LessonRepository, ProgressSink, WordRepository};
use lesson_core::model::{LessonId, Level};

use super::practice::PracticeSession;
use super::quiz::{QuizSession, ReportStatus};
use crate::Clock;
use crate::error::{PracticeError, PracticeStartError, QuizStartError};

/// Result of advancing a quiz, including whether a completion report was
/// attempted by this call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizAdvanceOutcome {
    pub is_complete: bool,
    pub report: Option<ReportStatus>,
}

//
// ─── QUIZ LOOP ─────────────────────────────────────────────────────────────────
//

/// Orchestrates quiz start and completion reporting.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    lessons: Arc<dyn LessonRepository>,
    progress: Arc<dyn ProgressSink>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        lessons: Arc<dyn LessonRepository>,
        progress: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            clock,
            lessons,
            progress,
        }
    }

    /// Load a lesson's exercises and start a quiz over them.
    ///
    /// # Errors
    ///
    /// Returns `QuizStartError::NoExercises` when the lesson has no usable
    /// exercises, or `QuizStartError::Api` for backend failures. Either way
    /// the caller shows a "no quiz available" state and keeps the start
    /// action disabled.
    pub async fn start_quiz(&self, lesson_id: &LessonId) -> Result<QuizSession, QuizStartError> {
        let exercises = self.lessons.lesson_exercises(lesson_id).await?;
        QuizSession::new(exercises, self.clock.now())
            .map_err(|_| QuizStartError::NoExercises)
    }

    /// Advance the quiz; on the completing step, report the final score.
    ///
    /// The report is fire-and-forget: a failed post is logged and surfaced as
    /// `ReportStatus::Failed` for a toast, but the completed results stand
    /// regardless. At most one report is attempted per completed run.
    pub async fn advance(
        &self,
        session: &mut QuizSession,
        lesson_id: &LessonId,
    ) -> QuizAdvanceOutcome {
        session.advance(self.clock.now());

        let mut report = None;
        if session.is_complete() && session.report_status().is_none() {
            if let Some(percent) = session.final_score_percent() {
                let status = match self.progress.post_completion(lesson_id, percent).await {
                    Ok(()) => ReportStatus::Sent,
                    Err(err) => {
                        warn!(lesson = %lesson_id, %err, "failed to report quiz completion");
                        ReportStatus::Failed
                    }
                };
                session.set_report_status(status);
                report = Some(status);
            }
        }

        QuizAdvanceOutcome {
            is_complete: session.is_complete(),
            report,
        }
    }

    /// "Try Again" over the same exercise list.
    pub fn restart(&self, session: &mut QuizSession) {
        session.restart(self.clock.now());
    }
}

//
// ─── PRACTICE LOOP ─────────────────────────────────────────────────────────────
//

/// Orchestrates flashcard practice sessions over the random-word endpoint.
#[derive(Clone)]
pub struct PracticeLoopService {
    clock: Clock,
    words: Arc<dyn WordRepository>,
}

impl PracticeLoopService {
    #[must_use]
    pub fn new(clock: Clock, words: Arc<dyn WordRepository>) -> Self {
        Self { clock, words }
    }

    /// Fetch random words and start a practice session.
    ///
    /// # Errors
    ///
    /// Returns `PracticeStartError::NoWords` when the backend has nothing for
    /// the request, or `PracticeStartError::Api` on transport failures.
    pub async fn start_practice(
        &self,
        count: u32,
        level: Option<Level>,
    ) -> Result<PracticeSession, PracticeStartError> {
        let words = self.words.random_words(count, level).await?;
        PracticeSession::new(words, self.clock.now())
            .map_err(|_| PracticeStartError::NoWords)
    }

    /// Reshuffle the deck in place.
    pub fn shuffle(&self, session: &mut PracticeSession) {
        let mut rng = rand::rng();
        session.shuffle(&mut rng);
    }

    /// Start a fresh session over the words still marked unknown.
    ///
    /// # Errors
    ///
    /// Propagates the session's preconditions: `PracticeError::NotComplete`
    /// or `PracticeError::NothingToRepeat`.
    pub fn restart_unknown_only(
        &self,
        session: &PracticeSession,
    ) -> Result<PracticeSession, PracticeError> {
        session.restart_with_unknown_only(self.clock.now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::InMemoryBackend;
    use lesson_core::model::{Exercise, ExerciseId, VocabWord, WordId};
    use lesson_core::time::fixed_clock;

    fn build_exercise(id: u32) -> Exercise {
        Exercise::new(
            ExerciseId::new(format!("e{id}")),
            format!("Q{id}"),
            vec!["right".into(), "wrong".into()],
            "right",
        )
        .unwrap()
    }

    fn build_word(id: u32) -> VocabWord {
        VocabWord::new(
            WordId::new(format!("w{id}")),
            format!("Wort{id}"),
            format!("word{id}"),
            None,
            None,
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn start_quiz_rejects_lessons_without_exercises() {
        let backend = Arc::new(InMemoryBackend::new());
        let quiz_loop =
            QuizLoopService::new(fixed_clock(), backend.clone(), backend);

        let err = quiz_loop
            .start_quiz(&LessonId::new("l1"))
            .await
            .unwrap_err();
        assert!(matches!(err, QuizStartError::NoExercises));
    }

    #[tokio::test]
    async fn completion_is_reported_exactly_once() {
        let backend = Arc::new(InMemoryBackend::new());
        let lesson = LessonId::new("l1");
        backend.set_exercises(lesson.clone(), vec![build_exercise(1), build_exercise(2)]);
        let quiz_loop =
            QuizLoopService::new(fixed_clock(), backend.clone(), backend.clone());

        let mut session = quiz_loop.start_quiz(&lesson).await.unwrap();
        session.select_answer("right");
        let first = quiz_loop.advance(&mut session, &lesson).await;
        assert!(!first.is_complete);
        assert_eq!(first.report, None);

        session.select_answer("wrong");
        let last = quiz_loop.advance(&mut session, &lesson).await;
        assert!(last.is_complete);
        assert_eq!(last.report, Some(ReportStatus::Sent));
        assert_eq!(backend.recorded_completions(), vec![(lesson.clone(), 50)]);

        // Advancing a finished session never re-posts.
        let again = quiz_loop.advance(&mut session, &lesson).await;
        assert_eq!(again.report, None);
        assert_eq!(backend.recorded_completions().len(), 1);
    }

    #[tokio::test]
    async fn failed_report_keeps_the_local_result() {
        let backend = Arc::new(InMemoryBackend::new());
        let lesson = LessonId::new("l1");
        backend.set_exercises(lesson.clone(), vec![build_exercise(1)]);
        backend.fail_completions(true);
        let quiz_loop =
            QuizLoopService::new(fixed_clock(), backend.clone(), backend.clone());

        let mut session = quiz_loop.start_quiz(&lesson).await.unwrap();
        session.select_answer("right");
        let outcome = quiz_loop.advance(&mut session, &lesson).await;

        assert!(outcome.is_complete);
        assert_eq!(outcome.report, Some(ReportStatus::Failed));
        // Score and pass/fail stand even though nothing was persisted.
        assert_eq!(session.final_score_percent(), Some(100));
        assert!(backend.recorded_completions().is_empty());
    }

    #[tokio::test]
    async fn practice_start_requires_words() {
        let backend = Arc::new(InMemoryBackend::new());
        let practice_loop = PracticeLoopService::new(fixed_clock(), backend.clone());

        let err = practice_loop.start_practice(10, None).await.unwrap_err();
        assert!(matches!(err, PracticeStartError::NoWords));

        backend.set_word_pool(vec![build_word(1), build_word(2)]);
        let session = practice_loop.start_practice(10, None).await.unwrap();
        assert_eq!(session.total_words(), 2);
    }
}
