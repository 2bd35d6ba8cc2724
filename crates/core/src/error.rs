use thiserror::Error;

use crate::compose::ComposeError;
use crate::model::{DatasetError, QuestionError, SettingsError};
use crate::synth::SynthesisError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
    #[error(transparent)]
    Compose(#[from] ComposeError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
