mod practice;
mod progress;
mod quiz;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::{PracticeError, QuizError};
pub use practice::{Classification, PracticeSession};
pub use progress::{PracticeProgress, QuizProgress};
pub use quiz::{PASS_THRESHOLD, QuizOutcome, QuizSession, ReportStatus};
pub use workflow::{PracticeLoopService, QuizAdvanceOutcome, QuizLoopService};
