//! Publishing boundary errors.

use crate::FailureKind;

/// Specific publishing error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PublishErrorKind {
    /// Credential rejected; an out-of-band token refresh is required
    #[display("Credential rejected: {}", _0)]
    AuthExpired(String),

    /// Platform throttled the request
    #[display("Rate limited (retry after {:?}s): {}", retry_after_secs, message)]
    RateLimited {
        /// Seconds suggested by the Retry-After header, when present
        retry_after_secs: Option<u64>,
        /// Response body
        message: String,
    },

    /// Image upload (registration or binary transfer) failed
    #[display("Image upload failed (status {:?}): {}", status, message)]
    UploadFailed {
        /// HTTP status, absent for transport failures
        status: Option<u16>,
        /// Response body or transport message
        message: String,
    },

    /// Post creation failed
    #[display("Post creation failed (status {:?}): {}", status, message)]
    PostFailed {
        /// HTTP status, absent for transport failures
        status: Option<u16>,
        /// Response body or transport message
        message: String,
    },

    /// Image uploaded but the post was not created
    #[display("Uploaded asset {} orphaned: {}", asset, cause)]
    PartialFailure {
        /// Handle of the uploaded asset
        asset: String,
        /// Error raised by post creation
        cause: Box<PublishErrorKind>,
    },
}

impl PublishErrorKind {
    /// Classify into a run failure kind.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::AuthExpired(_) => FailureKind::AuthExpired,
            Self::RateLimited { .. } => FailureKind::RateLimited,
            Self::UploadFailed { .. } => FailureKind::UploadFailed,
            Self::PostFailed { .. } => FailureKind::PostFailed,
            Self::PartialFailure { .. } => FailureKind::PartialFailure,
        }
    }

    /// Kind of the underlying error for partial failures, otherwise `None`.
    pub fn cause_kind(&self) -> Option<FailureKind> {
        match self {
            Self::PartialFailure { cause, .. } => Some(cause.failure_kind()),
            _ => None,
        }
    }
}

/// Publishing error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Publish Error: {} at {}:{}", kind, file, line)]
pub struct PublishError {
    /// The specific error kind
    pub kind: PublishErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl PublishError {
    /// Create a new publish error.
    #[track_caller]
    pub fn new(kind: PublishErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Wrap a post-creation failure that followed a successful upload.
    #[track_caller]
    pub fn partial(asset: impl Into<String>, cause: PublishErrorKind) -> Self {
        Self::new(PublishErrorKind::PartialFailure {
            asset: asset.into(),
            cause: Box::new(cause),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_failure_keeps_cause() {
        let err = PublishError::partial(
            "urn:li:digitalmediaAsset:1",
            PublishErrorKind::AuthExpired("401".into()),
        );
        assert_eq!(err.kind.failure_kind(), FailureKind::PartialFailure);
        assert_eq!(err.kind.cause_kind(), Some(FailureKind::AuthExpired));
        assert!(err.to_string().contains("urn:li:digitalmediaAsset:1"));
    }
}
