use std::error::Error;
use std::fmt;

/// Raised at the parsing boundary when a numeric field cannot be turned into a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    input: String,
    reason: String,
}

impl FormatError {
    pub fn new(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot parse '{}': {}", self.input, self.reason)
    }
}

impl Error for FormatError {}
