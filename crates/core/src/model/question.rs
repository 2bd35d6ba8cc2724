use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::compose::{MAX_ASKED_RANK, MIN_RANK_CATEGORIES};
use crate::model::Dataset;

//
// ─── CHART KIND ────────────────────────────────────────────────────────────────
//

/// How the presentation layer draws a question's dataset.
///
/// Purely cosmetic: it never affects the question or its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Pie,
    Bar,
}

impl ChartKind {
    pub const ALL: [ChartKind; 2] = [ChartKind::Pie, ChartKind::Bar];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Pie => "pie",
            ChartKind::Bar => "bar",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── QUESTION FAMILY ───────────────────────────────────────────────────────────
//

/// Which cognitive task a question asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Free-form estimate of one category's share.
    Percentage,
    /// Pick the category holding a given rank.
    Rank,
}

/// Family-specific question parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionParams {
    Percentage { target: String },
    Rank { rank: u8 },
}

impl QuestionParams {
    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        match self {
            QuestionParams::Percentage { .. } => QuestionKind::Percentage,
            QuestionParams::Rank { .. } => QuestionKind::Rank,
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A fully specified quiz question. Immutable once composed.
///
/// Deserialized questions go through [`QuestionDraft`] and must agree with
/// their dataset exactly as a composed question would.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionDraft", into = "QuestionDraft")]
pub struct Question {
    dataset: Dataset,
    chart: ChartKind,
    params: QuestionParams,
    options: Vec<String>,
    correct_answer: String,
}

impl Question {
    pub(crate) fn new(
        dataset: Dataset,
        chart: ChartKind,
        params: QuestionParams,
        options: Vec<String>,
        correct_answer: String,
    ) -> Self {
        Self {
            dataset,
            chart,
            params,
            options,
            correct_answer,
        }
    }

    /// Returns the same question drawn as a different chart.
    #[must_use]
    pub fn with_chart(mut self, chart: ChartKind) -> Self {
        self.chart = chart;
        self
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn chart(&self) -> ChartKind {
        self.chart
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.params.kind()
    }

    #[must_use]
    pub fn params(&self) -> &QuestionParams {
        &self.params
    }

    /// Candidate answers; empty for percentage questions.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Human-readable prompt for this question.
    #[must_use]
    pub fn prompt(&self) -> String {
        match &self.params {
            QuestionParams::Percentage { target } => {
                format!("What percentage of the whole is category {target}?")
            }
            QuestionParams::Rank { rank } => {
                format!(
                    "Which category has the {} largest share?",
                    ordinal(u32::from(*rank))
                )
            }
        }
    }
}

//
// ─── DESERIALIZATION ───────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("category {0} is not in the dataset")]
    UnknownTarget(String),

    #[error("percentage questions carry no options")]
    UnexpectedOptions,

    #[error("rank questions need at least 3 categories, got {len}")]
    TooFewCategories { len: usize },

    #[error("rank {rank} is outside 1..={deepest}")]
    RankOutOfRange { rank: u8, deepest: usize },

    #[error("rank options must list the dataset's categories in order")]
    OptionsMismatch,

    #[error("correct answer should be {expected:?}, got {found:?}")]
    AnswerMismatch { expected: String, found: String },
}

/// Unchecked question fields as they appear on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub dataset: Dataset,
    pub chart: ChartKind,
    pub params: QuestionParams,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuestionDraft {
    /// # Errors
    ///
    /// Returns `QuestionError` if the parameters, options or answer disagree
    /// with the dataset.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let expected = match &self.params {
            QuestionParams::Percentage { target } => {
                let value = self
                    .dataset
                    .value_of(target)
                    .ok_or_else(|| QuestionError::UnknownTarget(target.clone()))?;
                if !self.options.is_empty() {
                    return Err(QuestionError::UnexpectedOptions);
                }
                format!("{value}%")
            }
            QuestionParams::Rank { rank } => {
                let len = self.dataset.len();
                if len < MIN_RANK_CATEGORIES {
                    return Err(QuestionError::TooFewCategories { len });
                }
                let deepest = len.min(MAX_ASKED_RANK);
                let index = usize::from(*rank);
                if !(1..=deepest).contains(&index) {
                    return Err(QuestionError::RankOutOfRange {
                        rank: *rank,
                        deepest,
                    });
                }
                if self.options != self.dataset.names() {
                    return Err(QuestionError::OptionsMismatch);
                }
                self.dataset.ranked()[index - 1].name.clone()
            }
        };

        if self.correct_answer != expected {
            return Err(QuestionError::AnswerMismatch {
                expected,
                found: self.correct_answer,
            });
        }

        Ok(Question::new(
            self.dataset,
            self.chart,
            self.params,
            self.options,
            self.correct_answer,
        ))
    }
}

impl TryFrom<QuestionDraft> for Question {
    type Error = QuestionError;

    fn try_from(draft: QuestionDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

impl From<Question> for QuestionDraft {
    fn from(question: Question) -> Self {
        Self {
            dataset: question.dataset,
            chart: question.chart,
            params: question.params,
            options: question.options,
            correct_answer: question.correct_answer,
        }
    }
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
