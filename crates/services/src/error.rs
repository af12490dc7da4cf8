//! Shared error types for the services crate.

use thiserror::Error;

use api::ApiError;

/// Errors emitted by `QuizSession`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no exercises available for quiz")]
    Empty,
}

/// Errors emitted by `PracticeSession`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PracticeError {
    #[error("no words available for practice")]
    Empty,

    #[error("session is not complete yet")]
    NotComplete,

    #[error("no unknown words to repeat")]
    NothingToRepeat,
}

/// Errors emitted when loading a quiz from the backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizStartError {
    #[error("this lesson has no quiz")]
    NoExercises,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted when loading a practice session from the backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PracticeStartError {
    #[error("no words matched the request")]
    NoWords,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by speech synthesis adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SpeechError {
    #[error("speech synthesis is not available")]
    Disabled,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
