use chartquiz_core::Clock;
use chartquiz_core::model::{QuizResult, QuizSettings};
use rand::Rng;

use super::plan::QuizSetBuilder;
use super::progress::QuizProgress;
use super::service::QuizSession;
use crate::error::SessionError;

/// Result of answering a single question in a session.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizAnswerResult {
    pub result: QuizResult,
    pub progress: QuizProgress,
    pub is_complete: bool,
}

/// Orchestrates quiz start and timed answering against a clock.
#[derive(Debug, Clone)]
pub struct QuizRunner {
    clock: Clock,
    settings: QuizSettings,
}

impl QuizRunner {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            settings: QuizSettings::default_standard(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Mutable access to the clock, for advancing a fixed clock in tests.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// Build a fresh quiz set and start a session on it.
    ///
    /// Starting again simply replaces whatever session the caller held.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the set cannot be built or is empty.
    pub fn start_quiz<R: Rng + ?Sized>(
        &self,
        user_name: &str,
        rng: &mut R,
    ) -> Result<QuizSession, SessionError> {
        let quiz = QuizSetBuilder::new(&self.settings).build(rng)?;
        QuizSession::start(quiz, user_name, self.clock.now())
    }

    /// Restart the current question's timer at the clock's time.
    pub fn present_current(&self, session: &mut QuizSession) {
        session.present_current(self.clock.now());
    }

    /// Answer the current question at the clock's time.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` once every question is answered.
    pub fn answer_current(
        &self,
        session: &mut QuizSession,
        answer: &str,
    ) -> Result<QuizAnswerResult, SessionError> {
        let result = session.answer_current(answer, self.clock.now())?.clone();
        Ok(QuizAnswerResult {
            result,
            progress: session.progress(),
            is_complete: session.is_complete(),
        })
    }
}
