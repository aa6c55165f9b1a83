//! Run log errors.

/// Failure reading or appending the JSONL run log.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Run Log Error: {} at line {} in {}", message, line, file)]
pub struct RunLogError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl RunLogError {
    /// Create a new RunLogError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
