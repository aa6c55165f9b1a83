//! Validation limits for image assets.

use derive_getters::Getters;
use herald_core::ImageFormat;
use serde::{Deserialize, Serialize};

/// Default size ceiling: 8 MiB.
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 8 * 1024 * 1024;

/// What an image must satisfy before it is uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct AssetLimits {
    /// Largest accepted file, in bytes.
    #[builder(default = "DEFAULT_MAX_IMAGE_BYTES")]
    #[serde(default = "default_max_bytes")]
    max_bytes: u64,

    /// Accepted formats.
    #[builder(default = "vec![ImageFormat::Jpeg]")]
    #[serde(default = "default_formats")]
    formats: Vec<ImageFormat>,
}

fn default_max_bytes() -> u64 {
    DEFAULT_MAX_IMAGE_BYTES
}

fn default_formats() -> Vec<ImageFormat> {
    vec![ImageFormat::Jpeg]
}

impl Default for AssetLimits {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            formats: default_formats(),
        }
    }
}

impl AssetLimits {
    /// Create a builder for asset limits.
    pub fn builder() -> AssetLimitsBuilder {
        AssetLimitsBuilder::default()
    }

    /// Whether `format` is accepted.
    pub fn accepts(&self, format: ImageFormat) -> bool {
        self.formats.contains(&format)
    }
}
