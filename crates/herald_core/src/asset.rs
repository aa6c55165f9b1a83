//! Validated image assets.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Image container formats recognized by their leading bytes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// JPEG / JFIF
    #[display("jpeg")]
    Jpeg,
    /// PNG
    #[display("png")]
    Png,
    /// GIF87a / GIF89a
    #[display("gif")]
    Gif,
    /// WebP (RIFF container)
    #[display("webp")]
    Webp,
}

impl ImageFormat {
    /// Detect the format from the file header.
    ///
    /// # Examples
    ///
    /// ```
    /// use herald_core::ImageFormat;
    ///
    /// assert_eq!(ImageFormat::detect(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageFormat::Jpeg));
    /// assert_eq!(ImageFormat::detect(b"plain text"), None);
    /// ```
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(Self::Png),
            [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some(Self::Gif),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(Self::Webp),
            _ => None,
        }
    }

    /// MIME type sent as the upload content type.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }
}

/// An image that has been located and validated for upload.
#[derive(Clone, PartialEq, Eq, Getters)]
pub struct ImageAsset {
    /// Reference as written in the calendar.
    reference: String,
    /// Resolved location on disk.
    path: PathBuf,
    /// Detected format.
    format: ImageFormat,
    /// File contents.
    bytes: Vec<u8>,
    /// Hex SHA-256 digest of the contents.
    sha256: String,
}

impl ImageAsset {
    /// Create an asset from already validated parts.
    pub fn new(
        reference: impl Into<String>,
        path: impl Into<PathBuf>,
        format: ImageFormat,
        bytes: Vec<u8>,
        sha256: impl Into<String>,
    ) -> Self {
        Self {
            reference: reference.into(),
            path: path.into(),
            format,
            bytes,
            sha256: sha256.into(),
        }
    }

    /// Size of the asset in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

impl std::fmt::Debug for ImageAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageAsset")
            .field("reference", &self.reference)
            .field("path", &self.path)
            .field("format", &self.format)
            .field("size", &self.bytes.len())
            .field("sha256", &self.sha256)
            .finish()
    }
}
