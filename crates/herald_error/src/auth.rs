//! OAuth maintenance errors.

/// Specific OAuth error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AuthErrorKind {
    /// A credential required by the command is not configured
    #[display("Missing credential: {}", _0)]
    MissingCredential(String),

    /// Token endpoint or userinfo rejected the request
    #[display("OAuth request rejected (status {}): {}", status, message)]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Transport-level failure
    #[display("HTTP error: {}", _0)]
    Http(String),

    /// Response body could not be decoded
    #[display("Parse error: {}", _0)]
    Parse(String),
}

/// OAuth error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Auth Error: {} at {}:{}", kind, file, line)]
pub struct AuthError {
    /// The specific error kind
    pub kind: AuthErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl AuthError {
    /// Create a new auth error.
    #[track_caller]
    pub fn new(kind: AuthErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
