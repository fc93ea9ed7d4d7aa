mod progress;
mod service;
mod summary;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::QuizProgress;
pub use service::{Advance, CaptureStatus, QuestionResult, QuizPhase, QuizSession};
pub use summary::QuizSummary;
pub use workflow::QuizLoopService;
