mod dataset;
mod ids;
mod question;
mod quiz;
mod settings;

pub use dataset::{CATEGORY_NAMES, CategoryValue, Dataset, DatasetError, TOTAL_PERCENT};
pub use ids::{ParseIdError, QuizSetId, SessionId};
pub use question::{
    ChartKind, Question, QuestionDraft, QuestionError, QuestionKind, QuestionParams,
};
pub use quiz::{QuizResult, QuizSet};
pub use settings::{QuizSettings, QuizSettingsDraft, SettingsError};
