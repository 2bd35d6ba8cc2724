mod plan;
mod progress;
mod service;
mod summary;
mod workflow;

// Public API of the quiz session subsystem.
pub use crate::error::SessionError;
pub use plan::{MAX_SET_ID, QuizSetBuilder, build_quiz_set};
pub use progress::QuizProgress;
pub use service::QuizSession;
pub use summary::{QuizSummary, RunningTotal, running_totals};
pub use workflow::{QuizAnswerResult, QuizRunner};
