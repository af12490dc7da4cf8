#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;
pub mod speech;

pub use lesson_core::Clock;

pub use error::{PracticeError, PracticeStartError, QuizError, QuizStartError, SpeechError};

pub use sessions::{
    Classification, PASS_THRESHOLD, PracticeLoopService, PracticeProgress, PracticeSession,
    QuizAdvanceOutcome, QuizLoopService, QuizOutcome, QuizProgress, QuizSession, ReportStatus,
};
pub use speech::{CommandSynthesizer, SpeechService, Synthesizer};
