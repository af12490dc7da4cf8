use lesson_core::model::LessonId;
use services::{QuizLoopService, QuizSession, QuizStartError, ReportStatus};

use crate::views::ViewError;

/// Everything the results screen shows for a finished quiz.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResultsVm {
    pub score: u32,
    pub total: usize,
    pub percent: u8,
    pub passed: bool,
    pub report_failed: bool,
}

pub struct QuizVm {
    lesson_id: LessonId,
    session: QuizSession,
}

impl QuizVm {
    #[must_use]
    pub fn new(lesson_id: LessonId, session: QuizSession) -> Self {
        Self { lesson_id, session }
    }

    #[must_use]
    pub fn question(&self) -> Option<&str> {
        self.session
            .current_exercise()
            .map(|exercise| exercise.question())
    }

    #[must_use]
    pub fn options(&self) -> Vec<String> {
        self.session
            .current_exercise()
            .map(|exercise| exercise.options().to_vec())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn position_label(&self) -> String {
        format!(
            "Question {} of {}",
            self.session.current_index() + 1,
            self.session.total_exercises()
        )
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.session.is_locked()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.session.current_index() + 1 == self.session.total_exercises()
    }

    #[must_use]
    pub fn is_selected(&self, option: &str) -> bool {
        self.session.selected_answer() == Some(option)
    }

    /// Whether this option is the correct one, only revealed once the answer
    /// is locked.
    #[must_use]
    pub fn reveals_as_correct(&self, option: &str) -> bool {
        self.session.is_locked()
            && self
                .session
                .current_exercise()
                .is_some_and(|exercise| exercise.is_correct(option))
    }

    pub fn select(&mut self, option: &str) {
        self.session.select_answer(option);
    }

    /// Advance, posting the completion report on the final step.
    pub async fn advance(&mut self, quiz_loop: &QuizLoopService) {
        quiz_loop.advance(&mut self.session, &self.lesson_id).await;
    }

    pub fn restart(&mut self, quiz_loop: &QuizLoopService) {
        quiz_loop.restart(&mut self.session);
    }

    #[must_use]
    pub fn results(&self) -> Option<QuizResultsVm> {
        let percent = self.session.final_score_percent()?;
        let outcome = self.session.outcome()?;
        Some(QuizResultsVm {
            score: self.session.score(),
            total: self.session.total_exercises(),
            percent,
            passed: outcome.is_pass(),
            report_failed: self.session.report_status() == Some(ReportStatus::Failed),
        })
    }
}

/// # Errors
///
/// Returns `ViewError::Empty` when the lesson has no quiz, and
/// `ViewError::Unknown` for backend failures.
pub async fn start_quiz(
    quiz_loop: &QuizLoopService,
    lesson_id: LessonId,
) -> Result<QuizVm, ViewError> {
    let session = match quiz_loop.start_quiz(&lesson_id).await {
        Ok(session) => session,
        Err(QuizStartError::NoExercises) => return Err(ViewError::Empty),
        Err(_) => return Err(ViewError::Unknown),
    };

    Ok(QuizVm::new(lesson_id, session))
}
