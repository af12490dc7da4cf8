use thiserror::Error;

use crate::model::ids::ExerciseId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExerciseError {
    #[error("question text must not be empty")]
    EmptyQuestion,

    #[error("an exercise needs at least one option")]
    NoOptions,

    #[error("correct answer {answer:?} is not one of the options")]
    UnknownCorrectAnswer { answer: String },
}

/// One multiple-choice quiz question.
///
/// Immutable once built: a session never mutates its exercise list, only its
/// own index/score state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    id: ExerciseId,
    question: String,
    options: Vec<String>,
    correct_answer: String,
}

impl Exercise {
    /// Build an exercise, enforcing that `correct_answer` is a member of `options`.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseError::EmptyQuestion` for blank question text,
    /// `ExerciseError::NoOptions` for an empty option list, and
    /// `ExerciseError::UnknownCorrectAnswer` when the answer is not offered.
    pub fn new(
        id: ExerciseId,
        question: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Result<Self, ExerciseError> {
        let question = question.into();
        if question.trim().is_empty() {
            return Err(ExerciseError::EmptyQuestion);
        }
        if options.is_empty() {
            return Err(ExerciseError::NoOptions);
        }
        let correct_answer = correct_answer.into();
        if !options.iter().any(|option| *option == correct_answer) {
            return Err(ExerciseError::UnknownCorrectAnswer {
                answer: correct_answer,
            });
        }

        Ok(Self {
            id,
            question,
            options,
            correct_answer,
        })
    }

    #[must_use]
    pub fn id(&self) -> &ExerciseId {
        &self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Whether the given option is the correct answer for this exercise.
    #[must_use]
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_answer == option
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["der".into(), "die".into(), "das".into()]
    }

    #[test]
    fn builds_with_correct_answer_among_options() {
        let exercise =
            Exercise::new(ExerciseId::new("e1"), "___ Haus", options(), "das").unwrap();
        assert_eq!(exercise.question(), "___ Haus");
        assert_eq!(exercise.options().len(), 3);
        assert!(exercise.is_correct("das"));
        assert!(!exercise.is_correct("die"));
    }

    #[test]
    fn rejects_answer_outside_options() {
        let err =
            Exercise::new(ExerciseId::new("e1"), "___ Haus", options(), "den").unwrap_err();
        assert!(matches!(err, ExerciseError::UnknownCorrectAnswer { .. }));
    }

    #[test]
    fn rejects_empty_question_and_options() {
        let err = Exercise::new(ExerciseId::new("e1"), "  ", options(), "das").unwrap_err();
        assert!(matches!(err, ExerciseError::EmptyQuestion));

        let err =
            Exercise::new(ExerciseId::new("e1"), "___ Haus", Vec::new(), "das").unwrap_err();
        assert!(matches!(err, ExerciseError::NoOptions));
    }
}
