use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::model::{ChartKind, Dataset, Question, QuestionKind, QuizSetId};

//
// ─── QUIZ SET ──────────────────────────────────────────────────────────────────
//

/// An ordered run of questions presented one at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSet {
    id: QuizSetId,
    questions: Vec<Question>,
}

impl QuizSet {
    #[must_use]
    pub fn new(id: QuizSetId, questions: Vec<Question>) -> Self {
        Self { id, questions }
    }

    #[must_use]
    pub fn id(&self) -> QuizSetId {
        self.id
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn count_chart(&self, chart: ChartKind) -> usize {
        self.questions.iter().filter(|q| q.chart() == chart).count()
    }

    #[must_use]
    pub fn count_kind(&self, kind: QuestionKind) -> usize {
        self.questions.iter().filter(|q| q.kind() == kind).count()
    }
}

//
// ─── RESULT ────────────────────────────────────────────────────────────────────
//

/// One scored answer. Appended to a session and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    pub question_number: usize,
    pub chart: ChartKind,
    pub question_text: String,
    pub dataset: Dataset,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub time_spent: Duration,
    pub user_name: String,
}
