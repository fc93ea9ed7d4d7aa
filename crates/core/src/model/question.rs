use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::text::{Prompt, TextError};

/// Points a matching question is worth in the maximum score, regardless of its item count.
pub const MATCHING_MAX_POINTS: u32 = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error(transparent)]
    Prompt(#[from] TextError),

    #[error("question must offer at least one option")]
    NoOptions,

    #[error("correct option {0:?} is not one of the options")]
    CorrectOptionMissing(String),

    #[error("matching question needs items and matches (got {items} items, {matches} matches)")]
    EmptyMatching { items: usize, matches: usize },

    #[error("matching columns differ in length ({items} items, {matches} matches)")]
    UnevenMatching { items: usize, matches: usize },

    #[error("matching item {0:?} appears more than once")]
    DuplicateItem(String),

    #[error("fill-in-blank question needs at least one accepted answer")]
    NoAcceptedAnswers,
}

//
// ─── VARIANTS ──────────────────────────────────────────────────────────────────
//

/// Discriminant of the four supported question shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    SingleChoice,
    TrueFalse,
    Matching,
    FillInBlank,
}

/// Options plus the one option that is correct. Shared by single-choice and true/false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceBody {
    options: Vec<String>,
    correct_option: String,
}

impl ChoiceBody {
    fn new(options: Vec<String>, correct_option: String) -> Result<Self, QuestionError> {
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }
        if !options.iter().any(|option| *option == correct_option) {
            return Err(QuestionError::CorrectOptionMissing(correct_option));
        }
        Ok(Self {
            options,
            correct_option,
        })
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.correct_option
    }
}

/// Two columns and the answer key pairing each item with its match.
///
/// Item strings may carry presentational markup (icons). The key is looked up with
/// quote characters normalized, so it does not have to reproduce the item byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingBody {
    items: Vec<String>,
    matches: Vec<String>,
    correct_matches: BTreeMap<String, String>,
}

impl MatchingBody {
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    #[must_use]
    pub fn matches(&self) -> &[String] {
        &self.matches
    }

    #[must_use]
    pub fn correct_matches(&self) -> &BTreeMap<String, String> {
        &self.correct_matches
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillInBody {
    accepted: Vec<String>,
}

impl FillInBody {
    #[must_use]
    pub fn accepted(&self) -> &[String] {
        &self.accepted
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionBody {
    SingleChoice(ChoiceBody),
    TrueFalse(ChoiceBody),
    Matching(MatchingBody),
    FillInBlank(FillInBody),
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: Prompt,
    body: QuestionBody,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, there are no options, or the
    /// correct option is not among them.
    pub fn single_choice(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_option: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = Prompt::parse(prompt)?;
        let body = ChoiceBody::new(options, correct_option.into())?;
        Ok(Self {
            id,
            prompt,
            body: QuestionBody::SingleChoice(body),
        })
    }

    /// # Errors
    ///
    /// Same rules as [`Question::single_choice`].
    pub fn true_false(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_option: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = Prompt::parse(prompt)?;
        let body = ChoiceBody::new(options, correct_option.into())?;
        Ok(Self {
            id,
            prompt,
            body: QuestionBody::TrueFalse(body),
        })
    }

    /// # Errors
    ///
    /// Returns `QuestionError::EmptyMatching` if either column is empty,
    /// `QuestionError::UnevenMatching` if the columns differ in length and
    /// `QuestionError::DuplicateItem` if an item repeats. Responses and grades are keyed
    /// by item text, so each item must be distinct.
    pub fn matching(
        id: QuestionId,
        prompt: impl Into<String>,
        items: Vec<String>,
        matches: Vec<String>,
        correct_matches: BTreeMap<String, String>,
    ) -> Result<Self, QuestionError> {
        let prompt = Prompt::parse(prompt)?;
        if items.is_empty() || matches.is_empty() {
            return Err(QuestionError::EmptyMatching {
                items: items.len(),
                matches: matches.len(),
            });
        }
        if items.len() != matches.len() {
            return Err(QuestionError::UnevenMatching {
                items: items.len(),
                matches: matches.len(),
            });
        }
        let mut seen = BTreeSet::new();
        if let Some(duplicate) = items.iter().find(|item| !seen.insert(item.as_str())) {
            return Err(QuestionError::DuplicateItem(duplicate.clone()));
        }
        Ok(Self {
            id,
            prompt,
            body: QuestionBody::Matching(MatchingBody {
                items,
                matches,
                correct_matches,
            }),
        })
    }

    /// # Errors
    ///
    /// Returns `QuestionError::NoAcceptedAnswers` if `accepted` has no non-blank entry.
    pub fn fill_in_blank(
        id: QuestionId,
        prompt: impl Into<String>,
        accepted: Vec<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = Prompt::parse(prompt)?;
        if accepted.iter().all(|answer| answer.trim().is_empty()) {
            return Err(QuestionError::NoAcceptedAnswers);
        }
        Ok(Self {
            id,
            prompt,
            body: QuestionBody::FillInBlank(FillInBody { accepted }),
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    #[must_use]
    pub fn body(&self) -> &QuestionBody {
        &self.body
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        match self.body {
            QuestionBody::SingleChoice(_) => QuestionKind::SingleChoice,
            QuestionBody::TrueFalse(_) => QuestionKind::TrueFalse,
            QuestionBody::Matching(_) => QuestionKind::Matching,
            QuestionBody::FillInBlank(_) => QuestionKind::FillInBlank,
        }
    }

    /// Contribution of this question to the maximum possible score.
    #[must_use]
    pub fn max_points(&self) -> u32 {
        match self.kind() {
            QuestionKind::Matching => MATCHING_MAX_POINTS,
            _ => 1,
        }
    }
}
