use chrono::{DateTime, Utc};
use std::fmt;

use lesson_core::model::Exercise;

use super::progress::QuizProgress;
use crate::error::QuizError;

/// Score percentage at or above which a quiz counts as passed.
pub const PASS_THRESHOLD: u8 = 70;

/// Pass/fail verdict for a completed quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizOutcome {
    Pass,
    Fail,
}

impl QuizOutcome {
    #[must_use]
    pub fn is_pass(self) -> bool {
        matches!(self, QuizOutcome::Pass)
    }
}

/// Whether the completion report reached the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    Sent,
    Failed,
}

//
// ─── QUIZ SESSION ──────────────────────────────────────────────────────────────
//

/// In-memory quiz over an ordered exercise list.
///
/// Drives one question at a time: an answer locks as soon as it is selected,
/// `advance` moves on, and the final advance completes the session. The
/// exercise list itself is never mutated; "Try Again" resets the pointer over
/// the same list in the same order.
pub struct QuizSession {
    exercises: Vec<Exercise>,
    current: usize,
    selected: Option<String>,
    locked: bool,
    score: u32,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    reported: Option<ReportStatus>,
}

impl QuizSession {
    /// Create a quiz session over a non-empty exercise list.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if no exercises are provided; the caller
    /// shows a "no quiz available" state instead of a session.
    pub fn new(exercises: Vec<Exercise>, started_at: DateTime<Utc>) -> Result<Self, QuizError> {
        if exercises.is_empty() {
            return Err(QuizError::Empty);
        }

        Ok(Self {
            exercises,
            current: 0,
            selected: None,
            locked: false,
            score: 0,
            started_at,
            completed_at: None,
            reported: None,
        })
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn total_exercises(&self) -> usize {
        self.exercises.len()
    }

    /// Zero-based index of the question currently shown.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_exercise(&self) -> Option<&Exercise> {
        if self.is_complete() {
            None
        } else {
            self.exercises.get(self.current)
        }
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns a summary of the current quiz progress.
    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let answered = if self.is_complete() {
            self.exercises.len()
        } else {
            self.current + usize::from(self.locked)
        };
        QuizProgress {
            total: self.exercises.len(),
            answered,
            score: self.score,
            is_complete: self.is_complete(),
        }
    }

    /// Select an answer for the current question and lock it in.
    ///
    /// Scores exactly one point when the option matches the correct answer.
    /// A no-op once the question is locked or the session is complete, so an
    /// already-answered question can never be changed.
    pub fn select_answer(&mut self, option: &str) {
        if self.locked || self.is_complete() {
            return;
        }
        let Some(exercise) = self.exercises.get(self.current) else {
            return;
        };
        if !exercise.options().iter().any(|choice| choice == option) {
            return;
        }

        if exercise.is_correct(option) {
            self.score += 1;
        }
        self.selected = Some(option.to_string());
        self.locked = true;
    }

    /// Move to the next question, or complete the session on the last one.
    ///
    /// A no-op until an answer has been locked.
    pub fn advance(&mut self, now: DateTime<Utc>) {
        if !self.locked || self.is_complete() {
            return;
        }

        if self.current + 1 >= self.exercises.len() {
            self.completed_at = Some(now);
        } else {
            self.current += 1;
            self.selected = None;
            self.locked = false;
        }
    }

    /// Final percentage, defined only once the session is complete.
    ///
    /// The exercise list is non-empty by construction, so this never divides
    /// by zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn final_score_percent(&self) -> Option<u8> {
        self.completed_at?;
        let total = self.exercises.len() as f64;
        let percent = (f64::from(self.score) / total * 100.0).round();
        Some(percent.clamp(0.0, 100.0) as u8)
    }

    /// Pass/fail against the fixed threshold, defined only after completion.
    #[must_use]
    pub fn outcome(&self) -> Option<QuizOutcome> {
        let percent = self.final_score_percent()?;
        Some(if percent >= PASS_THRESHOLD {
            QuizOutcome::Pass
        } else {
            QuizOutcome::Fail
        })
    }

    /// "Try Again": reset all state over the same exercise list, in the same
    /// order.
    pub fn restart(&mut self, now: DateTime<Utc>) {
        self.current = 0;
        self.selected = None;
        self.locked = false;
        self.score = 0;
        self.started_at = now;
        self.completed_at = None;
        self.reported = None;
    }

    #[must_use]
    pub fn report_status(&self) -> Option<ReportStatus> {
        self.reported
    }

    pub(crate) fn set_report_status(&mut self, status: ReportStatus) {
        self.reported = Some(status);
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("exercises_len", &self.exercises.len())
            .field("current", &self.current)
            .field("locked", &self.locked)
            .field("score", &self.score)
            .field("completed_at", &self.completed_at)
            .field("reported", &self.reported)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::model::ExerciseId;
    use lesson_core::time::fixed_now;

    fn build_exercise(id: u32) -> Exercise {
        Exercise::new(
            ExerciseId::new(format!("e{id}")),
            format!("Q{id}"),
            vec!["right".into(), "wrong".into()],
            "right",
        )
        .unwrap()
    }

    fn build_session(count: u32) -> QuizSession {
        let exercises = (1..=count).map(build_exercise).collect();
        QuizSession::new(exercises, fixed_now()).unwrap()
    }

    #[test]
    fn empty_quiz_is_rejected() {
        let err = QuizSession::new(Vec::new(), fixed_now()).unwrap_err();
        assert!(matches!(err, QuizError::Empty));
    }

    #[test]
    fn full_run_completes_with_expected_percent() {
        let mut session = build_session(4);
        for _ in 0..4 {
            session.select_answer("right");
            session.advance(fixed_now());
        }

        assert!(session.is_complete());
        assert_eq!(session.final_score_percent(), Some(100));
        assert_eq!(session.outcome(), Some(QuizOutcome::Pass));
    }

    #[test]
    fn four_of_five_correct_rounds_to_eighty_and_passes() {
        let mut session = build_session(5);
        for _ in 0..4 {
            session.select_answer("right");
            session.advance(fixed_now());
        }
        session.select_answer("wrong");
        session.advance(fixed_now());

        assert_eq!(session.score(), 4);
        assert_eq!(session.final_score_percent(), Some(80));
        assert!(session.outcome().unwrap().is_pass());
    }

    #[test]
    fn all_wrong_scores_zero_and_fails() {
        let mut session = build_session(3);
        for _ in 0..3 {
            session.select_answer("wrong");
            session.advance(fixed_now());
        }

        assert_eq!(session.final_score_percent(), Some(0));
        assert_eq!(session.outcome(), Some(QuizOutcome::Fail));
    }

    #[test]
    fn two_of_three_rounds_up_to_sixty_seven() {
        let mut session = build_session(3);
        session.select_answer("right");
        session.advance(fixed_now());
        session.select_answer("right");
        session.advance(fixed_now());
        session.select_answer("wrong");
        session.advance(fixed_now());

        assert_eq!(session.final_score_percent(), Some(67));
        assert_eq!(session.outcome(), Some(QuizOutcome::Fail));
    }

    #[test]
    fn locked_answer_cannot_be_changed() {
        let mut session = build_session(2);
        session.select_answer("wrong");
        assert_eq!(session.score(), 0);
        assert_eq!(session.selected_answer(), Some("wrong"));

        // Second selection while locked is a no-op.
        session.select_answer("right");
        assert_eq!(session.score(), 0);
        assert_eq!(session.selected_answer(), Some("wrong"));
    }

    #[test]
    fn unknown_option_is_ignored() {
        let mut session = build_session(1);
        session.select_answer("not-an-option");
        assert!(!session.is_locked());
        assert_eq!(session.selected_answer(), None);
    }

    #[test]
    fn advance_without_answer_is_a_no_op() {
        let mut session = build_session(2);
        session.advance(fixed_now());
        assert_eq!(session.current_index(), 0);
        assert!(!session.is_complete());
    }

    #[test]
    fn advance_clears_selection_between_questions() {
        let mut session = build_session(2);
        session.select_answer("right");
        session.advance(fixed_now());

        assert_eq!(session.current_index(), 1);
        assert_eq!(session.selected_answer(), None);
        assert!(!session.is_locked());
    }

    #[test]
    fn percent_is_undefined_before_completion() {
        let mut session = build_session(2);
        session.select_answer("right");
        assert_eq!(session.final_score_percent(), None);
        assert_eq!(session.outcome(), None);
    }

    #[test]
    fn restart_resets_state_but_keeps_exercise_order() {
        let mut session = build_session(2);
        let first_question = session.current_exercise().unwrap().question().to_string();
        session.select_answer("right");
        session.advance(fixed_now());
        session.select_answer("right");
        session.advance(fixed_now());
        assert!(session.is_complete());

        session.restart(fixed_now());
        assert!(!session.is_complete());
        assert_eq!(session.score(), 0);
        assert_eq!(session.report_status(), None);
        assert_eq!(
            session.current_exercise().unwrap().question(),
            first_question
        );
    }

    #[test]
    fn progress_counts_the_locked_question() {
        let mut session = build_session(3);
        assert_eq!(session.progress().answered, 0);

        session.select_answer("right");
        assert_eq!(session.progress().answered, 1);

        session.advance(fixed_now());
        assert_eq!(session.progress().answered, 1);
    }
}
