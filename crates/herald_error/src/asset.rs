//! Image asset errors.

use crate::FailureKind;

/// Specific asset error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AssetErrorKind {
    /// Calendar entry names no image
    #[display("No image reference in calendar entry")]
    MissingReference,

    /// Referenced file does not exist
    #[display("Image not found: {}", _0)]
    NotFound(String),

    /// Referenced file exists but could not be read
    #[display("Failed to read image {}: {}", path, message)]
    Read {
        /// Image path
        path: String,
        /// Underlying I/O message
        message: String,
    },

    /// Reference resolves outside the images directory
    #[display("Image reference escapes the asset directory: {}", _0)]
    OutsideRoot(String),

    /// File is empty
    #[display("Image is empty: {}", _0)]
    Empty(String),

    /// File is larger than the configured ceiling
    #[display("Image is {} bytes, limit is {}", size, limit)]
    Oversized {
        /// Actual size in bytes
        size: u64,
        /// Configured ceiling in bytes
        limit: u64,
    },

    /// File is not in the accepted format
    #[display("Unsupported image format: {}", _0)]
    UnsupportedFormat(String),
}

impl AssetErrorKind {
    /// Classify into a run failure kind.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::MissingReference | Self::NotFound(_) | Self::Read { .. } => {
                FailureKind::AssetMissing
            }
            Self::OutsideRoot(_)
            | Self::Empty(_)
            | Self::Oversized { .. }
            | Self::UnsupportedFormat(_) => FailureKind::AssetInvalid,
        }
    }
}

/// Asset error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Asset Error: {} at {}:{}", kind, file, line)]
pub struct AssetError {
    /// The specific error kind
    pub kind: AssetErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl AssetError {
    /// Create a new asset error.
    #[track_caller]
    pub fn new(kind: AssetErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
