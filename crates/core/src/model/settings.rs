use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compose::MIN_RANK_CATEGORIES;
use crate::model::CATEGORY_NAMES;
use crate::synth::{DEFAULT_MAX_PERCENT, DEFAULT_MIN_PERCENT, SynthesisError, SynthesisPolicy};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("questions per family must be > 0")]
    InvalidQuestionsPerKind,

    #[error("percentage datasets need between 2 and 10 categories, got {min}..={max}")]
    InvalidPercentageCategories { min: usize, max: usize },

    #[error("rank datasets need between 3 and 10 categories, got {0}")]
    InvalidRankCategories(usize),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Shape of a generated quiz.
///
/// For each chart kind the builder emits `questions_per_kind` percentage
/// questions and as many rank questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuizSettingsDraft", into = "QuizSettingsDraft")]
pub struct QuizSettings {
    questions_per_kind: u32,
    percentage_min_categories: usize,
    percentage_max_categories: usize,
    rank_categories: usize,
    policy: SynthesisPolicy,
}

impl QuizSettings {
    /// The standard 20-question quiz.
    ///
    /// - 5 percentage and 5 rank questions per chart kind
    /// - percentage datasets of 3 or 4 categories
    /// - rank datasets of 4 categories
    /// - every category between 5% and 49%
    #[must_use]
    pub fn default_standard() -> Self {
        Self {
            questions_per_kind: 5,
            percentage_min_categories: 3,
            percentage_max_categories: 4,
            rank_categories: 4,
            policy: SynthesisPolicy::standard(),
        }
    }

    /// # Errors
    ///
    /// Returns `SettingsError` if any count is out of range or the synthesis
    /// bounds cannot produce a dataset for one of the configured sizes.
    pub fn new(
        questions_per_kind: u32,
        percentage_categories: (usize, usize),
        rank_categories: usize,
        policy: SynthesisPolicy,
    ) -> Result<Self, SettingsError> {
        let (min, max) = percentage_categories;
        if questions_per_kind == 0 {
            return Err(SettingsError::InvalidQuestionsPerKind);
        }
        if min < 2 || min > max || max > CATEGORY_NAMES.len() {
            return Err(SettingsError::InvalidPercentageCategories { min, max });
        }
        if !(MIN_RANK_CATEGORIES..=CATEGORY_NAMES.len()).contains(&rank_categories) {
            return Err(SettingsError::InvalidRankCategories(rank_categories));
        }
        for count in (min..=max).chain(std::iter::once(rank_categories)) {
            policy.check(count)?;
        }

        Ok(Self {
            questions_per_kind,
            percentage_min_categories: min,
            percentage_max_categories: max,
            rank_categories,
            policy,
        })
    }

    #[must_use]
    pub fn questions_per_kind(&self) -> u32 {
        self.questions_per_kind
    }

    #[must_use]
    pub fn percentage_categories(&self) -> (usize, usize) {
        (self.percentage_min_categories, self.percentage_max_categories)
    }

    #[must_use]
    pub fn rank_categories(&self) -> usize {
        self.rank_categories
    }

    #[must_use]
    pub fn policy(&self) -> SynthesisPolicy {
        self.policy
    }

    /// Total questions a quiz built from these settings contains.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        // two chart kinds, two question families
        usize::try_from(self.questions_per_kind).unwrap_or(usize::MAX) * 4
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self::default_standard()
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated settings as read from a config file; missing fields take the
/// standard values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSettingsDraft {
    pub questions_per_kind: u32,
    pub percentage_min_categories: usize,
    pub percentage_max_categories: usize,
    pub rank_categories: usize,
    pub min_percent: u32,
    pub max_percent: u32,
}

impl Default for QuizSettingsDraft {
    fn default() -> Self {
        Self {
            questions_per_kind: 5,
            percentage_min_categories: 3,
            percentage_max_categories: 4,
            rank_categories: 4,
            min_percent: DEFAULT_MIN_PERCENT,
            max_percent: DEFAULT_MAX_PERCENT,
        }
    }
}

impl QuizSettingsDraft {
    /// # Errors
    ///
    /// See [`QuizSettings::new`].
    pub fn validate(self) -> Result<QuizSettings, SettingsError> {
        let policy = SynthesisPolicy::new(self.min_percent, self.max_percent)?;
        QuizSettings::new(
            self.questions_per_kind,
            (self.percentage_min_categories, self.percentage_max_categories),
            self.rank_categories,
            policy,
        )
    }
}

impl TryFrom<QuizSettingsDraft> for QuizSettings {
    type Error = SettingsError;

    fn try_from(draft: QuizSettingsDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

impl From<QuizSettings> for QuizSettingsDraft {
    fn from(settings: QuizSettings) -> Self {
        Self {
            questions_per_kind: settings.questions_per_kind,
            percentage_min_categories: settings.percentage_min_categories,
            percentage_max_categories: settings.percentage_max_categories,
            rank_categories: settings.rank_categories,
            min_percent: settings.policy.min_percent(),
            max_percent: settings.policy.max_percent(),
        }
    }
}
