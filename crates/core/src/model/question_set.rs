use std::collections::HashSet;

use crate::model::ids::QuestionId;
use crate::model::question::Question;

/// The ordered working set of questions for one quiz session.
///
/// Holds at most [`QuestionSet::CAP`] questions and never the same question twice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Maximum number of questions drawn into one session.
    pub const CAP: usize = 20;

    /// Build a set from already-ordered questions, keeping the first occurrence of each id
    /// and stopping at [`QuestionSet::CAP`].
    #[must_use]
    pub fn from_ordered(questions: impl IntoIterator<Item = Question>) -> Self {
        let mut seen: HashSet<QuestionId> = HashSet::new();
        let questions = questions
            .into_iter()
            .filter(|question| seen.insert(question.id()))
            .take(Self::CAP)
            .collect();
        Self { questions }
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
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Sum of every question's maximum points.
    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.questions.iter().map(Question::max_points).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(id: u64) -> Question {
        Question::fill_in_blank(QuestionId::new(id), format!("Q{id}"), vec!["a".into()]).unwrap()
    }

    #[test]
    fn caps_at_twenty() {
        let set = QuestionSet::from_ordered((0..30).map(fill));
        assert_eq!(set.len(), QuestionSet::CAP);
        assert_eq!(set.get(0).map(Question::id), Some(QuestionId::new(0)));
    }

    #[test]
    fn drops_repeated_ids() {
        let set = QuestionSet::from_ordered(vec![fill(1), fill(2), fill(1)]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.max_score(), 2);
    }
}
