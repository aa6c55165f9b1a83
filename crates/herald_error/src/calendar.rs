//! Content calendar errors.

use crate::FailureKind;

/// Specific calendar error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CalendarErrorKind {
    /// Calendar file could not be read
    #[display("Failed to read calendar {}: {}", path, message)]
    Read {
        /// Calendar location
        path: String,
        /// Underlying I/O message
        message: String,
    },

    /// Calendar contents are not a valid list of entries
    #[display("Failed to parse calendar {}: {}", path, message)]
    Parse {
        /// Calendar location
        path: String,
        /// Underlying parser message
        message: String,
    },

    /// No entry is scheduled for the requested date
    #[display("No post scheduled for {}", _0)]
    NotFound(String),
}

impl CalendarErrorKind {
    /// Classify into a run failure kind.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::NotFound(_) => FailureKind::NotFound,
            Self::Read { .. } | Self::Parse { .. } => FailureKind::CalendarUnavailable,
        }
    }
}

/// Calendar error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Calendar Error: {} at {}:{}", kind, file, line)]
pub struct CalendarError {
    /// The specific error kind
    pub kind: CalendarErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl CalendarError {
    /// Create a new calendar error.
    #[track_caller]
    pub fn new(kind: CalendarErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
