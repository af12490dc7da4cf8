use thiserror::Error;

use crate::model::{DialogueError, ExerciseError, WordError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Exercise(#[from] ExerciseError),
    #[error(transparent)]
    Word(#[from] WordError),
    #[error(transparent)]
    Dialogue(#[from] DialogueError),
}
