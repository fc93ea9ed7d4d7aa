use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Question, QuestionBody, QuestionId, QuestionKind};

/// Longest answer accepted by a fill-in-blank input, in characters.
pub const FILL_IN_MAX_LEN: usize = 25;

/// Response controls for one presentation of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// One pickable entry per option, in display order.
    Choice { options: Vec<String> },
    /// One dropdown per item; every dropdown lists all `matches`.
    ///
    /// The two columns are shuffled independently.
    Matching {
        items: Vec<String>,
        matches: Vec<String>,
    },
    FillInBlank { max_len: usize },
}

/// A question laid out for display. Option lists are shuffled per presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    question_id: QuestionId,
    kind: QuestionKind,
    prompt: String,
    layout: Layout,
}

impl Presentation {
    #[must_use]
    pub fn present(question: &Question) -> Self {
        Self::present_with_rng(question, &mut rand::rng())
    }

    #[must_use]
    pub fn present_with_rng<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Self {
        let layout = match question.body() {
            QuestionBody::SingleChoice(body) | QuestionBody::TrueFalse(body) => {
                let mut options = body.options().to_vec();
                options.shuffle(rng);
                Layout::Choice { options }
            }
            QuestionBody::Matching(body) => {
                let mut items = body.items().to_vec();
                let mut matches = body.matches().to_vec();
                items.shuffle(rng);
                matches.shuffle(rng);
                Layout::Matching { items, matches }
            }
            QuestionBody::FillInBlank(_) => Layout::FillInBlank {
                max_len: FILL_IN_MAX_LEN,
            },
        };

        Self {
            question_id: question.id(),
            kind: question.kind(),
            prompt: question.prompt().as_str().to_string(),
            layout,
        }
    }

    #[must_use]
    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }
}
