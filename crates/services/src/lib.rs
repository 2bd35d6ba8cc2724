#![forbid(unsafe_code)]

pub mod error;
pub mod export;
pub mod sessions;

pub use chartquiz_core::Clock;
pub use sessions as session;

pub use error::{ExportError, QuizBuildError, SessionError};

pub use sessions::{
    QuizAnswerResult, QuizProgress, QuizRunner, QuizSession, QuizSetBuilder, QuizSummary,
    build_quiz_set,
};
