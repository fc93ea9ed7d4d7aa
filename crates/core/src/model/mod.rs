mod ids;
mod question;
mod question_set;
mod response;
mod text;

pub use ids::QuestionId;
pub use question::{
    ChoiceBody, FillInBody, MATCHING_MAX_POINTS, MatchingBody, Question, QuestionBody,
    QuestionError, QuestionKind,
};
pub use question_set::QuestionSet;
pub use response::Response;
pub use text::{Prompt, TextError};
