/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based position of the question on screen, capped at `total`.
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    pub score: u32,
    pub max_score: u32,
}

impl QuizProgress {
    /// Progress bar scale. Ten steps per question.
    #[must_use]
    pub fn bar_max(&self) -> usize {
        self.total.saturating_mul(10)
    }

    #[must_use]
    pub fn bar_value(&self) -> usize {
        self.position.saturating_mul(10)
    }
}
