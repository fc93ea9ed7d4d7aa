use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("prompt text must not be empty")]
    Empty,
}

/// Non-empty prompt text shown above a question's response controls.
///
/// Stored verbatim. Rendering decides how the text is escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// # Errors
    ///
    /// Returns `TextError::Empty` when the text is blank.
    pub fn parse(s: impl Into<String>) -> Result<Self, TextError> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(s))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
