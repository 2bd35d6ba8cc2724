//! Shared error types for the services crate.

use thiserror::Error;

use chartquiz_core::compose::ComposeError;
use chartquiz_core::synth::SynthesisError;

/// Errors emitted while assembling a quiz set.
///
/// Settings that passed validation never produce these.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizBuildError {
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
    #[error(transparent)]
    Compose(#[from] ComposeError),
}

/// Errors emitted by quiz sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("quiz set has no questions")]
    Empty,
    #[error("quiz already completed")]
    Completed,
    #[error(transparent)]
    Build(#[from] QuizBuildError),
}

/// Errors emitted while exporting results or quiz sets.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("exported text is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}
