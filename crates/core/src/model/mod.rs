mod dialogue;
mod exercise;
mod flashcard;
mod ids;
mod lesson;
mod section;
mod text;
mod word;

pub use ids::{ExerciseId, LessonId, WordId};

pub use dialogue::{DialogueError, DialogueLine, Side};
pub use exercise::{Exercise, ExerciseError};
pub use flashcard::FlipState;
pub use lesson::{LessonDetail, LessonOverview};
pub use section::{LessonSection, SectionFlow};
pub use text::{LessonText, Locale};
pub use word::{Level, VocabWord, WordError};
