//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::GradeError;
use storage::repository::StorageError;

/// Errors emitted by the quiz session state machine and its orchestration.
///
/// Every variant except `Storage` describes a rejected transition; the session is left
/// exactly as it was.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,
    #[error("response is not complete")]
    Incomplete,
    #[error("current question has not been graded")]
    NotGraded,
    #[error("current question is already graded")]
    AlreadyGraded,
    #[error("quiz is not finished")]
    NotFinished,
    #[error("quiz already finished")]
    Finished,
    #[error(transparent)]
    Grade(#[from] GradeError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
