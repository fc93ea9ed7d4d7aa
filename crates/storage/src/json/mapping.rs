use std::collections::BTreeMap;

use quiz_core::model::{Question, QuestionError, QuestionId};
use serde::Deserialize;
use thiserror::Error;

/// Why a single pool record was dropped.
#[derive(Debug, Error)]
pub(crate) enum RecordError {
    #[error("unreadable record: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("invalid question: {0}")]
    Invalid(#[from] QuestionError),
}

/// Persisted shape of one question, tagged by `type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub(crate) enum QuestionRecord {
    #[serde(rename = "multipleChoice", alias = "singleChoice")]
    MultipleChoice {
        question: String,
        options: Vec<String>,
        #[serde(rename = "correctOption")]
        correct_option: String,
    },
    #[serde(rename = "trueFalse")]
    TrueFalse {
        question: String,
        options: Vec<String>,
        #[serde(rename = "correctOption")]
        correct_option: String,
    },
    #[serde(rename = "matching")]
    Matching {
        question: String,
        options: MatchingColumns,
        #[serde(rename = "correctMatches")]
        correct_matches: BTreeMap<String, String>,
    },
    #[serde(rename = "fillInTheBlank", alias = "fillInBlank")]
    FillInTheBlank {
        question: String,
        #[serde(rename = "correctOptions")]
        correct_options: Vec<String>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MatchingColumns {
    items: Vec<String>,
    matches: Vec<String>,
}

impl QuestionRecord {
    pub(crate) fn into_question(self, id: QuestionId) -> Result<Question, QuestionError> {
        match self {
            Self::MultipleChoice {
                question,
                options,
                correct_option,
            } => Question::single_choice(id, question, options, correct_option),
            Self::TrueFalse {
                question,
                options,
                correct_option,
            } => Question::true_false(id, question, options, correct_option),
            Self::Matching {
                question,
                options,
                correct_matches,
            } => Question::matching(id, question, options.items, options.matches, correct_matches),
            Self::FillInTheBlank {
                question,
                correct_options,
            } => Question::fill_in_blank(id, question, correct_options),
        }
    }
}

pub(crate) fn decode_record(id: QuestionId, value: serde_json::Value) -> Result<Question, RecordError> {
    let record: QuestionRecord = serde_json::from_value(value)?;
    Ok(record.into_question(id)?)
}
