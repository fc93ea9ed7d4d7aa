use std::sync::Arc;

use storage::repository::QuestionSource;

use super::service::{Advance, QuizSession};
use crate::Clock;
use crate::error::SessionError;
use crate::store::QuestionStore;

/// Orchestrates loading the pool, drawing a question set and session lifecycle.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    source: Arc<dyn QuestionSource>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, source: Arc<dyn QuestionSource>) -> Self {
        Self { clock, source }
    }

    /// Fetch the pool, draw a fresh set and open a session on its first question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the pool cannot be fetched and
    /// `SessionError::Empty` if it holds no usable questions.
    pub async fn start_session(&self) -> Result<QuizSession, SessionError> {
        let set = self.draw().await?;
        let session = QuizSession::new(set, self.clock.now())?;
        tracing::info!(
            questions = session.total_questions(),
            max_score = session.max_score(),
            "quiz started"
        );
        Ok(session)
    }

    /// Advance `session`, stamping completion with the service clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotGraded` if the current question is not graded yet.
    pub fn advance(&self, session: &mut QuizSession) -> Result<Advance, SessionError> {
        session.advance(self.clock.now())
    }

    /// Draw a fresh set and restart a finished session on it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFinished` without touching storage if the quiz is still
    /// running, or any error from fetching and drawing the new set.
    pub async fn restart(&self, session: &mut QuizSession) -> Result<(), SessionError> {
        if !session.is_finished() {
            return Err(SessionError::NotFinished);
        }
        let set = self.draw().await?;
        session.restart(set, self.clock.now())?;
        tracing::info!(questions = session.total_questions(), "quiz restarted");
        Ok(())
    }

    async fn draw(&self) -> Result<quiz_core::model::QuestionSet, SessionError> {
        let pool = self.source.fetch_pool().await.inspect_err(|err| {
            tracing::error!(error = %err, "failed to load question pool");
        })?;
        tracing::debug!(pool = pool.len(), "question pool loaded");
        let set = QuestionStore::load(pool);
        if set.is_empty() {
            return Err(SessionError::Empty);
        }
        Ok(set)
    }
}
