//! Publish boundary results.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Remote identifier of a created post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", _0)]
#[serde(transparent)]
pub struct PostId(pub String);

/// Handle of an uploaded image, referenced by post creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", _0)]
#[serde(transparent)]
pub struct UploadHandle(pub String);

/// Outcome of one publish attempt. Written to the run log, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PublishResult {
    /// Whether the post was created.
    success: bool,
    /// Remote post identifier, when created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    post_id: Option<PostId>,
    /// Uploaded image handle, when the upload went through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    upload: Option<UploadHandle>,
    /// Error detail, when the attempt failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    /// When the attempt finished.
    timestamp: DateTime<Utc>,
}

impl PublishResult {
    /// A created post.
    pub fn published(upload: UploadHandle, post_id: PostId) -> Self {
        Self {
            success: true,
            post_id: Some(post_id),
            upload: Some(upload),
            error: None,
            timestamp: Utc::now(),
        }
    }

    /// A failed attempt. `upload` is set when the image went through first.
    pub fn failed(upload: Option<UploadHandle>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            post_id: None,
            upload,
            error: Some(error.into()),
            timestamp: Utc::now(),
        }
    }
}
