#![forbid(unsafe_code)]

pub mod error;
pub mod render;
pub mod sessions;
pub mod store;

pub use quiz_core::Clock;
pub use sessions as session;

pub use error::SessionError;
pub use render::{Layout, Presentation, ResponseCapture};
pub use sessions::{
    Advance, CaptureStatus, QuestionResult, QuizLoopService, QuizPhase, QuizProgress,
    QuizSession, QuizSummary,
};
pub use store::QuestionStore;
