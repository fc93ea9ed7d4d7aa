//! Variant-aware presentation of a question and capture of the user's provisional answer.

mod capture;
mod presentation;

pub use capture::ResponseCapture;
pub use presentation::{FILL_IN_MAX_LEN, Layout, Presentation};
