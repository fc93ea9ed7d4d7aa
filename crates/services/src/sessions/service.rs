use std::fmt;

use chrono::{DateTime, Utc};
use quiz_core::model::{Question, QuestionId, QuestionSet, Response};
use quiz_core::{Grade, grade};

use super::progress::QuizProgress;
use super::summary::QuizSummary;
use crate::error::SessionError;

//
// ─── STATES ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// The current question is shown and accepts response changes.
    AwaitingResponse,
    /// The current question has been graded; only `advance` moves on.
    Graded,
    /// Every question has been graded and advanced past.
    Finished,
}

/// What a capture event did to the provisional response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStatus {
    /// The session is not awaiting a response; nothing changed.
    Ignored,
    Incomplete,
    Complete,
}

/// Outcome of `advance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Next,
    Finished(QuizSummary),
}

/// Grade recorded for one question of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionResult {
    pub question_id: QuestionId,
    pub grade: Grade,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz session.
///
/// Steps through a [`QuestionSet`] one question at a time:
/// `AwaitingResponse -> Graded -> AwaitingResponse (next) | Finished`.
/// Rejected transitions return an error and leave the session unchanged.
pub struct QuizSession {
    questions: QuestionSet,
    current: usize,
    score: u32,
    phase: QuizPhase,
    response: Option<Response>,
    results: Vec<QuestionResult>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start a session on the first question of `questions`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the set has no questions.
    pub fn new(questions: QuestionSet, started_at: DateTime<Utc>) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }
        Ok(Self {
            questions,
            current: 0,
            score: 0,
            phase: QuizPhase::AwaitingResponse,
            response: None,
            results: Vec::new(),
            started_at,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.questions.max_score()
    }

    #[must_use]
    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase == QuizPhase::Finished {
            return None;
        }
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    #[must_use]
    pub fn results(&self) -> &[QuestionResult] {
        &self.results
    }

    /// Grade of the current question once it has been submitted.
    #[must_use]
    pub fn current_grade(&self) -> Option<&Grade> {
        if self.phase != QuizPhase::Graded {
            return None;
        }
        self.results.last().map(|result| &result.grade)
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
    pub fn is_finished(&self) -> bool {
        self.phase == QuizPhase::Finished
    }

    /// Submission is allowed only while awaiting a complete response.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.phase == QuizPhase::AwaitingResponse
            && match (self.current_question(), self.response.as_ref()) {
                (Some(question), Some(response)) => response.is_complete_for(question),
                _ => false,
            }
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.phase == QuizPhase::Graded
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            position: (self.current + 1).min(self.questions.len()),
            total: self.questions.len(),
            answered: self.results.len(),
            score: self.score,
            max_score: self.max_score(),
        }
    }

    /// Summary of a finished session.
    #[must_use]
    pub fn summary(&self) -> Option<QuizSummary> {
        let completed_at = self.completed_at?;
        Some(QuizSummary {
            score: self.score,
            max_score: self.max_score(),
            questions: self.questions.len(),
            started_at: self.started_at,
            completed_at,
        })
    }

    /// Show the question at the current index: clear the response and await a new one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` once every question has been advanced past.
    pub fn new_question(&mut self) -> Result<&Question, SessionError> {
        if self.phase == QuizPhase::Finished {
            return Err(SessionError::Finished);
        }
        let question = self
            .questions
            .get(self.current)
            .ok_or(SessionError::Finished)?;
        self.response = None;
        self.phase = QuizPhase::AwaitingResponse;
        tracing::debug!(index = self.current, question = %question.id(), "awaiting response");
        Ok(question)
    }

    /// Record the provisional response for the current question.
    ///
    /// A no-op once the question is graded or the quiz is finished.
    pub fn capture(&mut self, response: Response) -> CaptureStatus {
        if self.phase != QuizPhase::AwaitingResponse {
            return CaptureStatus::Ignored;
        }
        let Some(question) = self.questions.get(self.current) else {
            return CaptureStatus::Ignored;
        };
        let complete = response.is_complete_for(question);
        self.response = Some(response);
        if complete {
            CaptureStatus::Complete
        } else {
            CaptureStatus::Incomplete
        }
    }

    /// Grade the current response and add its points to the score.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished`, `SessionError::AlreadyGraded` or
    /// `SessionError::Incomplete` when submission is not allowed, and
    /// `SessionError::Grade` if the response does not fit the question.
    pub fn submit(&mut self) -> Result<&Grade, SessionError> {
        match self.phase {
            QuizPhase::Finished => return Err(SessionError::Finished),
            QuizPhase::Graded => return Err(SessionError::AlreadyGraded),
            QuizPhase::AwaitingResponse => {}
        }
        let question = self
            .questions
            .get(self.current)
            .ok_or(SessionError::Finished)?;
        let response = self.response.as_ref().ok_or(SessionError::Incomplete)?;
        if !response.is_complete_for(question) {
            return Err(SessionError::Incomplete);
        }

        let grade = grade(question, response)?;
        let question_id = question.id();
        self.score = self.score.saturating_add(grade.delta());
        self.phase = QuizPhase::Graded;
        tracing::debug!(
            question = %question_id,
            delta = grade.delta(),
            score = self.score,
            "graded question"
        );
        self.results.push(QuestionResult { question_id, grade });

        self.results
            .last()
            .map(|result| &result.grade)
            .ok_or(SessionError::NotGraded)
    }

    /// Move past a graded question.
    ///
    /// `now` stamps completion when this was the last question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotGraded` unless the current question has been graded.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<Advance, SessionError> {
        match self.phase {
            QuizPhase::Graded => {}
            QuizPhase::Finished => return Err(SessionError::Finished),
            QuizPhase::AwaitingResponse => return Err(SessionError::NotGraded),
        }

        self.current += 1;
        if self.current >= self.questions.len() {
            self.phase = QuizPhase::Finished;
            self.response = None;
            self.completed_at = Some(now);
            let summary = self.summary().ok_or(SessionError::NotFinished)?;
            tracing::info!(
                score = summary.score,
                max_score = summary.max_score,
                "quiz finished"
            );
            return Ok(Advance::Finished(summary));
        }

        self.new_question()?;
        Ok(Advance::Next)
    }

    /// Start over on a freshly drawn set.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFinished` before the quiz is finished and
    /// `SessionError::Empty` if `questions` is empty. The session is unchanged on error.
    pub fn restart(
        &mut self,
        questions: QuestionSet,
        started_at: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        if self.phase != QuizPhase::Finished {
            return Err(SessionError::NotFinished);
        }
        *self = Self::new(questions, started_at)?;
        Ok(())
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("score", &self.score)
            .field("phase", &self.phase)
            .field("results_len", &self.results.len())
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
