use chrono::{DateTime, Utc};

/// Final result of a finished quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    pub score: u32,
    pub max_score: u32,
    pub questions: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl QuizSummary {
    /// `"<score> out of <max>"`.
    #[must_use]
    pub fn score_line(&self) -> String {
        format!("{} out of {}", self.score, self.max_score)
    }
}
