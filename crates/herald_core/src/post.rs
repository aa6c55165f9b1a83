//! Rendered posts.

use crate::ImageAsset;
use derive_getters::Getters;

/// Caption and image ready for submission.
///
/// Created once per run and dropped after the publish attempt.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RenderedPost {
    /// Identifier of the calendar entry this post came from.
    entry_id: String,
    /// Generated caption.
    caption: String,
    /// Validated image.
    asset: ImageAsset,
}

impl RenderedPost {
    /// Assemble a rendered post.
    pub fn new(entry_id: impl Into<String>, caption: impl Into<String>, asset: ImageAsset) -> Self {
        Self {
            entry_id: entry_id.into(),
            caption: caption.into(),
            asset,
        }
    }
}
