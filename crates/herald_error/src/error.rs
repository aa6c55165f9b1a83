//! Top-level error wrapper types.

use crate::{
    AssetError, AuthError, AuthErrorKind, CalendarError, ConfigError, FailureKind,
    GenerationError, HttpError, JsonError, PublishError, RunLogError,
};

/// Every error a Herald crate can raise.
///
/// # Examples
///
/// ```
/// use herald_error::{HeraldError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: HeraldError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum HeraldErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Content calendar error
    #[from(CalendarError)]
    Calendar(CalendarError),
    /// Text-generation error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Image asset error
    #[from(AssetError)]
    Asset(AssetError),
    /// Publishing boundary error
    #[from(PublishError)]
    Publish(PublishError),
    /// OAuth maintenance error
    #[from(AuthError)]
    Auth(AuthError),
    /// Run log error
    #[from(RunLogError)]
    RunLog(RunLogError),
}

/// Herald error with kind discrimination.
///
/// # Examples
///
/// ```
/// use herald_error::{ConfigError, FailureKind, HeraldResult};
///
/// fn might_fail() -> HeraldResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert_eq!(err.failure_kind(), Some(FailureKind::Misconfigured));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Herald Error: {}", _0)]
pub struct HeraldError(Box<HeraldErrorKind>);

impl HeraldError {
    /// Create a new error from a kind.
    pub fn new(kind: HeraldErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &HeraldErrorKind {
        &self.0
    }

    /// Classify the error into a run failure kind.
    ///
    /// Returns `None` for errors outside the run pipeline (notification
    /// transport, run log I/O, serialization).
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self.kind() {
            HeraldErrorKind::Http(_)
            | HeraldErrorKind::Json(_)
            | HeraldErrorKind::RunLog(_) => None,
            HeraldErrorKind::Config(_) => Some(FailureKind::Misconfigured),
            HeraldErrorKind::Calendar(e) => Some(e.kind.failure_kind()),
            HeraldErrorKind::Generation(_) => Some(FailureKind::GenerationFailed),
            HeraldErrorKind::Asset(e) => Some(e.kind.failure_kind()),
            HeraldErrorKind::Publish(e) => Some(e.kind.failure_kind()),
            HeraldErrorKind::Auth(e) => match e.kind {
                AuthErrorKind::MissingCredential(_) => Some(FailureKind::Misconfigured),
                _ => Some(FailureKind::AuthExpired),
            },
        }
    }

    /// For partial publish failures, the kind of the underlying cause.
    pub fn cause_kind(&self) -> Option<FailureKind> {
        match self.kind() {
            HeraldErrorKind::Publish(e) => e.kind.cause_kind(),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to HeraldErrorKind
impl<T> From<T> for HeraldError
where
    T: Into<HeraldErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Herald operations.
pub type HeraldResult<T> = std::result::Result<T, HeraldError>;
