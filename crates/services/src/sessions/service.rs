use chrono::{DateTime, Utc};
use log::{debug, info};

use chartquiz_core::evaluate::evaluate;
use chartquiz_core::model::{Question, QuizResult, QuizSet, SessionId};
use chartquiz_core::time::elapsed_between;

use super::progress::QuizProgress;
use super::summary::QuizSummary;
use crate::error::SessionError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One run through a quiz set for one user.
///
/// Steps through the questions in order, scoring each submitted answer and
/// appending an immutable `QuizResult`. The per-question timer starts when the
/// session starts and restarts whenever a question is answered or re-presented.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: SessionId,
    quiz: QuizSet,
    user_name: String,
    current: usize,
    results: Vec<QuizResult>,
    started_at: DateTime<Utc>,
    question_started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start a session over `quiz` for `user_name`.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the quiz has no questions.
    pub fn start(
        quiz: QuizSet,
        user_name: impl Into<String>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if quiz.is_empty() {
            return Err(SessionError::Empty);
        }
        let session = Self {
            id: SessionId::generate(),
            quiz,
            user_name: user_name.into().trim().to_string(),
            current: 0,
            results: Vec::new(),
            started_at,
            question_started_at: started_at,
            completed_at: None,
        };
        info!(
            "session {} started: quiz set {} with {} questions",
            session.id,
            session.quiz.id(),
            session.quiz.len()
        );
        Ok(session)
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizSet {
        &self.quiz
    }

    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn results(&self) -> &[QuizResult] {
        &self.results
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.questions().get(self.current)
    }

    /// 1-based number of the question awaiting an answer.
    #[must_use]
    pub fn current_number(&self) -> Option<usize> {
        self.current_question().map(|_| self.current + 1)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            total: self.quiz.len(),
            answered: self.results.len(),
            remaining: self.quiz.len().saturating_sub(self.current),
            is_complete: self.is_complete(),
        }
    }

    #[must_use]
    pub fn summary(&self) -> QuizSummary {
        QuizSummary::from_results(&self.results)
    }

    /// Restart the timer for the current question, e.g. when it is shown
    /// after the previous answer's feedback was dismissed.
    pub fn present_current(&mut self, shown_at: DateTime<Utc>) {
        if !self.is_complete() {
            self.question_started_at = shown_at;
        }
    }

    /// Score `answer` against the current question and advance.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if every question was already answered.
    pub fn answer_current(
        &mut self,
        answer: &str,
        answered_at: DateTime<Utc>,
    ) -> Result<&QuizResult, SessionError> {
        let Some(question) = self.current_question() else {
            return Err(SessionError::Completed);
        };

        let result = QuizResult {
            question_number: self.current + 1,
            chart: question.chart(),
            question_text: question.prompt(),
            dataset: question.dataset().clone(),
            user_answer: answer.to_string(),
            correct_answer: question.correct_answer().to_string(),
            is_correct: evaluate(question, answer),
            time_spent: elapsed_between(self.question_started_at, answered_at),
            user_name: self.user_name.clone(),
        };
        debug!(
            "session {} question {}: answered {:?}, expected {:?}, correct: {}",
            self.id,
            result.question_number,
            result.user_answer,
            result.correct_answer,
            result.is_correct
        );

        self.results.push(result);
        self.current += 1;
        self.question_started_at = answered_at;
        if self.current >= self.quiz.len() {
            self.completed_at = Some(answered_at);
            let summary = self.summary();
            info!(
                "session {} completed: {}/{} correct",
                self.id, summary.correct, summary.total
            );
        }

        self.results.last().ok_or(SessionError::Completed)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use chartquiz_core::compose::{compose_percentage_question, compose_rank_question};
    use chartquiz_core::model::{ChartKind, Dataset, QuizSetId};
    use chartquiz_core::random::ScriptedSource;
    use chartquiz_core::time::fixed_now;
    use chrono::Duration;

    // percentage question on B = 40%, then a rank-1 question answered by "C"
    fn two_question_set() -> QuizSet {
        let percentage = compose_percentage_question(
            Dataset::from_values(&[60, 40]).unwrap(),
            &mut ScriptedSource::default(),
        );
        let rank = compose_rank_question(
            Dataset::from_values(&[20, 30, 50]).unwrap(),
            &mut ScriptedSource::new([0, u32::MAX]),
        )
        .unwrap();
        QuizSet::new(QuizSetId::new(4), vec![percentage, rank])
    }

    #[test]
    fn empty_quiz_is_rejected() {
        let quiz = QuizSet::new(QuizSetId::new(1), Vec::new());
        let err = QuizSession::start(quiz, "kim", fixed_now()).unwrap_err();
        assert!(matches!(err, SessionError::Empty));
    }

    #[test]
    fn answers_are_scored_and_timed() {
        let start = fixed_now();
        let mut session = QuizSession::start(two_question_set(), "  kim ", start).unwrap();
        assert_eq!(session.user_name(), "kim");
        assert_eq!(session.current_number(), Some(1));

        let first = session
            .answer_current("43", start + Duration::seconds(4))
            .unwrap()
            .clone();
        assert!(first.is_correct);
        assert_eq!(first.question_number, 1);
        assert_eq!(first.correct_answer, "40%");
        assert_eq!(first.time_spent, Duration::seconds(4));
        assert_eq!(first.user_name, "kim");
        assert_eq!(first.chart, ChartKind::Pie);
        assert_eq!(
            first.question_text,
            "What percentage of the whole is category B?"
        );

        // feedback shown for 10s before the next question appears
        session.present_current(start + Duration::seconds(14));
        let second = session
            .answer_current("c", start + Duration::seconds(16))
            .unwrap()
            .clone();
        assert!(!second.is_correct);
        assert_eq!(second.chart, ChartKind::Bar);
        assert_eq!(second.time_spent, Duration::seconds(2));

        assert!(session.is_complete());
        assert_eq!(session.completed_at(), Some(start + Duration::seconds(16)));
        assert_eq!(session.current_number(), None);
    }

    #[test]
    fn answer_returns_the_result_just_recorded() {
        let start = fixed_now();
        let mut session = QuizSession::start(two_question_set(), "kim", start).unwrap();
        for (number, answer) in [(1, "40"), (2, "C")] {
            let returned = session.answer_current(answer, start).unwrap().clone();
            assert_eq!(returned.question_number, number);
            assert_eq!(returned.user_answer, answer);
            assert!(returned.is_correct);
            assert_eq!(session.results().last(), Some(&returned));
        }
        assert_eq!(session.results().len(), 2);
    }

    #[test]
    fn answering_after_completion_fails() {
        let start = fixed_now();
        let mut session = QuizSession::start(two_question_set(), "kim", start).unwrap();
        session.answer_current("40", start).unwrap();
        session.answer_current("C", start).unwrap();
        let err = session.answer_current("C", start).unwrap_err();
        assert!(matches!(err, SessionError::Completed));
        assert_eq!(session.results().len(), 2);
    }

    #[test]
    fn progress_tracks_answers() {
        let start = fixed_now();
        let mut session = QuizSession::start(two_question_set(), "kim", start).unwrap();
        let before = session.progress();
        assert_eq!(before.total, 2);
        assert_eq!(before.answered, 0);
        assert_eq!(before.remaining, 2);
        assert!(!before.is_complete);

        session.answer_current("garbage", start).unwrap();
        let after = session.progress();
        assert_eq!(after.answered, 1);
        assert_eq!(after.remaining, 1);
        assert!((after.fraction() - 0.5).abs() < f64::EPSILON);
        assert!(!session.results()[0].is_correct);
    }

    #[test]
    fn summary_reflects_results() {
        let start = fixed_now();
        let mut session = QuizSession::start(two_question_set(), "kim", start).unwrap();
        session
            .answer_current("40%", start + Duration::seconds(3))
            .unwrap();
        session
            .answer_current("C", start + Duration::seconds(5))
            .unwrap();
        let summary = session.summary();
        assert_eq!(summary.correct, 2);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.total_time, Duration::seconds(5));
    }
}
