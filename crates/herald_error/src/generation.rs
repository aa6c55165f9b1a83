//! Text-generation errors.

/// Specific text-generation error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Transport-level failure reaching the API
    #[display("HTTP error: {}", _0)]
    Http(String),

    /// API answered with a non-success status
    #[display("API error (status {}): {}", status, message)]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Response body could not be decoded
    #[display("Parse error: {}", _0)]
    Parse(String),

    /// Response contained no usable text
    #[display("Generated text is empty")]
    EmptyOutput,

    /// Generated text exceeds the caption ceiling
    #[display("Generated text is {} characters, limit is {}", length, limit)]
    TooLong {
        /// Character count of the generated text
        length: usize,
        /// Configured ceiling
        limit: usize,
    },

    /// Request construction failed
    #[display("Builder error: {}", _0)]
    Builder(String),
}

/// Text-generation error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at {}:{}", kind, file, line)]
pub struct GenerationError {
    /// The specific error kind
    pub kind: GenerationErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new generation error.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
