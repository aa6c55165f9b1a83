//! Mapping of LinkedIn responses onto publish error kinds.

use herald_error::PublishErrorKind;
use reqwest::{Response, StatusCode, header::RETRY_AFTER};

/// Which half of the publish flow a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Upload,
    Post,
}

impl Phase {
    /// Error for a failure that never produced a response.
    pub(crate) fn transport(self, message: impl Into<String>) -> PublishErrorKind {
        self.failed(None, message.into())
    }

    fn failed(self, status: Option<u16>, message: String) -> PublishErrorKind {
        match self {
            Self::Upload => PublishErrorKind::UploadFailed { status, message },
            Self::Post => PublishErrorKind::PostFailed { status, message },
        }
    }
}

/// Consume a non-success response into an error kind.
///
/// 401 means the token expired or was revoked; 429 carries the
/// `Retry-After` delay when the platform sends one.
pub(crate) async fn classify(phase: Phase, response: Response) -> PublishErrorKind {
    let status = response.status();
    let retry_after_secs = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    let body = response.text().await.unwrap_or_default();

    classify_parts(phase, status, retry_after_secs, body)
}

fn classify_parts(
    phase: Phase,
    status: StatusCode,
    retry_after_secs: Option<u64>,
    body: String,
) -> PublishErrorKind {
    match status {
        StatusCode::UNAUTHORIZED => PublishErrorKind::AuthExpired(body),
        StatusCode::TOO_MANY_REQUESTS => PublishErrorKind::RateLimited {
            retry_after_secs,
            message: body,
        },
        other => phase.failed(Some(other.as_u16()), body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_error::FailureKind;

    #[test]
    fn status_codes_map_to_kinds() {
        let cases = [
            (Phase::Upload, StatusCode::UNAUTHORIZED, FailureKind::AuthExpired),
            (Phase::Post, StatusCode::UNAUTHORIZED, FailureKind::AuthExpired),
            (Phase::Upload, StatusCode::TOO_MANY_REQUESTS, FailureKind::RateLimited),
            (Phase::Upload, StatusCode::BAD_REQUEST, FailureKind::UploadFailed),
            (Phase::Post, StatusCode::FORBIDDEN, FailureKind::PostFailed),
            (Phase::Post, StatusCode::INTERNAL_SERVER_ERROR, FailureKind::PostFailed),
        ];

        for (phase, status, expected) in cases {
            let kind = classify_parts(phase, status, None, String::new());
            assert_eq!(kind.failure_kind(), expected, "{phase:?} {status}");
        }
    }

    #[test]
    fn rate_limit_keeps_retry_after() {
        let kind = classify_parts(Phase::Post, StatusCode::TOO_MANY_REQUESTS, Some(120), "slow".into());
        assert_eq!(
            kind,
            PublishErrorKind::RateLimited {
                retry_after_secs: Some(120),
                message: "slow".into()
            }
        );
    }
}
