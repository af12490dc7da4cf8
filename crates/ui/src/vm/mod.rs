mod lesson_vm;
mod practice_vm;
mod quiz_vm;

pub use lesson_vm::{
    DialogueBubbleVm, LessonCardVm, LessonDetailVm, WordCardVm, map_lesson_cards,
    map_lesson_detail, map_word_cards,
};
pub use practice_vm::{PracticeIntent, PracticeVm, start_practice};
pub use quiz_vm::{QuizResultsVm, QuizVm, start_quiz};
