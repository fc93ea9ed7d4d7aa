use std::collections::BTreeMap;

use crate::model::question::{Question, QuestionBody};

/// A user's captured answer, shaped by the question variant it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// The option string picked for a single-choice or true/false question.
    Choice(String),
    /// Chosen match per item, keyed by the item string.
    Matching(BTreeMap<String, String>),
    /// Raw text typed into a fill-in-blank input.
    Text(String),
}

impl Response {
    /// Whether this response is ready to be submitted for `question`.
    ///
    /// A response of the wrong shape for the question is never complete.
    #[must_use]
    pub fn is_complete_for(&self, question: &Question) -> bool {
        match (question.body(), self) {
            (QuestionBody::SingleChoice(_) | QuestionBody::TrueFalse(_), Response::Choice(_)) => {
                true
            }
            (QuestionBody::Matching(body), Response::Matching(chosen)) => {
                body.items().iter().all(|item| {
                    chosen
                        .get(item)
                        .is_some_and(|choice| !choice.trim().is_empty())
                })
            }
            (QuestionBody::FillInBlank(_), Response::Text(text)) => !text.trim().is_empty(),
            _ => false,
        }
    }
}
