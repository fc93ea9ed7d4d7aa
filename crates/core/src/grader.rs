//! Pure grading of a captured response against a question's answer key.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::{ChoiceBody, FillInBody, MatchingBody, Question, QuestionBody, QuestionKind, Response};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GradeError {
    #[error("a {response} response cannot answer a {question:?} question")]
    ResponseMismatch {
        question: QuestionKind,
        response: &'static str,
    },
}

/// The part of a question a verdict applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradedUnit {
    /// The whole answer (single-choice, true/false, fill-in-blank).
    Whole,
    /// One matching item, identified by its item string.
    Item(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitVerdict {
    pub unit: GradedUnit,
    pub correct: bool,
}

/// Verdicts for one graded question plus the points it earned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    verdicts: Vec<UnitVerdict>,
    delta: u32,
}

impl Grade {
    fn from_verdicts(verdicts: Vec<UnitVerdict>) -> Self {
        let delta = verdicts
            .iter()
            .filter(|verdict| verdict.correct)
            .fold(0_u32, |acc, _| acc.saturating_add(1));
        Self { verdicts, delta }
    }

    /// Points to add to the session score.
    #[must_use]
    pub fn delta(&self) -> u32 {
        self.delta
    }

    #[must_use]
    pub fn verdicts(&self) -> &[UnitVerdict] {
        &self.verdicts
    }

    /// True when every graded unit is correct.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        !self.verdicts.is_empty() && self.verdicts.iter().all(|verdict| verdict.correct)
    }

    /// Verdict for a whole-answer question, if this grade has one.
    #[must_use]
    pub fn whole(&self) -> Option<bool> {
        self.verdicts
            .iter()
            .find(|verdict| verdict.unit == GradedUnit::Whole)
            .map(|verdict| verdict.correct)
    }

    /// Verdict for one matching item.
    #[must_use]
    pub fn item(&self, item: &str) -> Option<bool> {
        self.verdicts
            .iter()
            .find(|verdict| matches!(&verdict.unit, GradedUnit::Item(name) if name == item))
            .map(|verdict| verdict.correct)
    }
}

/// Grade `response` against `question`.
///
/// Deterministic and side-effect free: the same pair always yields the same grade.
///
/// # Errors
///
/// Returns `GradeError::ResponseMismatch` when the response shape does not fit the
/// question variant.
pub fn grade(question: &Question, response: &Response) -> Result<Grade, GradeError> {
    match (question.body(), response) {
        (QuestionBody::SingleChoice(body) | QuestionBody::TrueFalse(body), Response::Choice(selected)) => {
            Ok(grade_choice(body, selected))
        }
        (QuestionBody::Matching(body), Response::Matching(chosen)) => {
            Ok(grade_matching(body, chosen))
        }
        (QuestionBody::FillInBlank(body), Response::Text(text)) => Ok(grade_fill_in(body, text)),
        (_, response) => Err(GradeError::ResponseMismatch {
            question: question.kind(),
            response: response_label(response),
        }),
    }
}

fn response_label(response: &Response) -> &'static str {
    match response {
        Response::Choice(_) => "choice",
        Response::Matching(_) => "matching",
        Response::Text(_) => "text",
    }
}

fn grade_choice(body: &ChoiceBody, selected: &str) -> Grade {
    Grade::from_verdicts(vec![UnitVerdict {
        unit: GradedUnit::Whole,
        correct: selected == body.correct_option(),
    }])
}

fn grade_matching(body: &MatchingBody, chosen: &BTreeMap<String, String>) -> Grade {
    let verdicts = body
        .items()
        .iter()
        .map(|item| {
            let expected = lookup_match(body.correct_matches(), item);
            let correct = match (chosen.get(item), expected) {
                (Some(choice), Some(expected)) => {
                    normalize_quotes(choice) == normalize_quotes(expected)
                }
                // A missing answer key entry can never be satisfied.
                _ => false,
            };
            UnitVerdict {
                unit: GradedUnit::Item(item.clone()),
                correct,
            }
        })
        .collect();
    Grade::from_verdicts(verdicts)
}

fn grade_fill_in(body: &FillInBody, text: &str) -> Grade {
    let input = text.trim().to_lowercase();
    let correct = body
        .accepted()
        .iter()
        .any(|answer| answer.trim().to_lowercase() == input);
    Grade::from_verdicts(vec![UnitVerdict {
        unit: GradedUnit::Whole,
        correct,
    }])
}

fn lookup_match<'a>(key: &'a BTreeMap<String, String>, item: &str) -> Option<&'a String> {
    if let Some(found) = key.get(item) {
        return Some(found);
    }
    let wanted = normalize_quotes(item);
    key.iter()
        .find(|(candidate, _)| normalize_quotes(candidate) == wanted)
        .map(|(_, value)| value)
}

/// Fold straight and typographic quotes onto a single apostrophe.
///
/// Authoring data mixes quote styles between item markup and the answer key.
#[must_use]
pub fn normalize_quotes(input: &str) -> String {
    input
        .chars()
        .map(|ch| match ch {
            '"' | '\u{201C}' | '\u{201D}' | '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        })
        .collect()
}
