//! Run failure classification.

use serde::{Deserialize, Serialize};

/// Terminal failure kinds of a dispatcher run.
///
/// Every error raised while a run is in flight is classified into one of
/// these. The kind is written to the run log and selects the exit status.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No calendar entry is scheduled for the run date.
    #[display("NotFound")]
    NotFound,
    /// The calendar could not be read or parsed.
    #[display("CalendarUnavailable")]
    CalendarUnavailable,
    /// Credentials or settings are missing or invalid.
    #[display("Misconfigured")]
    Misconfigured,
    /// The text-generation service failed or returned unusable text.
    #[display("GenerationFailed")]
    GenerationFailed,
    /// The image asset could not be located.
    #[display("AssetMissing")]
    AssetMissing,
    /// The image asset has the wrong format or size.
    #[display("AssetInvalid")]
    AssetInvalid,
    /// The publishing credential was rejected and needs an out-of-band refresh.
    #[display("AuthExpired")]
    AuthExpired,
    /// The publishing service throttled the request.
    #[display("RateLimited")]
    RateLimited,
    /// The image upload failed; nothing was published.
    #[display("UploadFailed")]
    UploadFailed,
    /// Post creation failed.
    #[display("PostFailed")]
    PostFailed,
    /// The image was uploaded but the post was not created.
    #[display("PartialFailure")]
    PartialFailure,
}

impl FailureKind {
    /// Process exit status for this failure kind. Always non-zero.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NotFound => 2,
            Self::CalendarUnavailable => 3,
            Self::Misconfigured => 4,
            Self::GenerationFailed => 5,
            Self::AssetMissing => 6,
            Self::AssetInvalid => 7,
            Self::AuthExpired => 8,
            Self::RateLimited => 9,
            Self::UploadFailed => 10,
            Self::PostFailed => 11,
            Self::PartialFailure => 12,
        }
    }

    /// Whether remediation happens out-of-band (credential refresh) rather
    /// than by fixing content or waiting for the next trigger.
    pub fn needs_credential_refresh(&self) -> bool {
        matches!(self, Self::AuthExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn exit_codes_are_distinct_and_non_zero() {
        let codes: HashSet<u8> = FailureKind::iter().map(|k| k.exit_code()).collect();
        assert_eq!(codes.len(), FailureKind::iter().count());
        assert!(!codes.contains(&0));
    }

    #[test]
    fn display_names_the_kind() {
        assert_eq!(FailureKind::PartialFailure.to_string(), "PartialFailure");
        assert_eq!(FailureKind::AuthExpired.to_string(), "AuthExpired");
        assert!(FailureKind::AuthExpired.needs_credential_refresh());
        assert!(!FailureKind::RateLimited.needs_credential_refresh());
    }
}
