//! Filesystem-backed asset store.
//!
//! Images live as plain files under one directory; calendar entries refer to
//! them by relative file name.

use crate::{AssetLimits, AssetStore};
use herald_core::{ImageAsset, ImageFormat};
use herald_error::{AssetError, AssetErrorKind, HeraldResult};
use sha2::{Digest, Sha256};
use std::path::{Component, Path, PathBuf};

/// Asset store rooted at a directory.
///
/// # Example Structure
///
/// ```text
/// content/images/
/// ├── week1_sun_comt.jpg
/// ├── week1_tue_creatine.jpg
/// └── week1_thu_sleep.jpg
/// ```
#[derive(Debug, Clone)]
pub struct FileSystemAssetStore {
    base_path: PathBuf,
    limits: AssetLimits,
}

impl FileSystemAssetStore {
    /// Create a store rooted at `base_path`. The directory is not required to
    /// exist until an asset is resolved.
    pub fn new(base_path: impl Into<PathBuf>, limits: AssetLimits) -> Self {
        Self {
            base_path: base_path.into(),
            limits,
        }
    }

    /// Root directory of the store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Validation limits applied by `resolve`.
    pub fn limits(&self) -> &AssetLimits {
        &self.limits
    }

    /// Compute SHA-256 hash of data.
    fn compute_hash(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    /// Join a reference onto the root, refusing anything but plain relative
    /// file names.
    fn locate(&self, reference: &str) -> Result<PathBuf, AssetError> {
        let relative = Path::new(reference);
        let plain = relative.components().count() > 0
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));

        if !plain {
            return Err(AssetError::new(AssetErrorKind::OutsideRoot(
                reference.to_string(),
            )));
        }

        Ok(self.base_path.join(relative))
    }

    /// Reject symlinks that lead out of the root.
    async fn ensure_inside_root(&self, path: &Path, reference: &str) -> Result<(), AssetError> {
        let read_error = |e: std::io::Error| {
            AssetError::new(AssetErrorKind::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        };

        let root = tokio::fs::canonicalize(&self.base_path)
            .await
            .map_err(read_error)?;
        let resolved = tokio::fs::canonicalize(path).await.map_err(read_error)?;

        if !resolved.starts_with(&root) {
            return Err(AssetError::new(AssetErrorKind::OutsideRoot(
                reference.to_string(),
            )));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl AssetStore for FileSystemAssetStore {
    #[tracing::instrument(skip(self), fields(base = %self.base_path.display()))]
    async fn resolve(&self, reference: Option<&str>) -> HeraldResult<ImageAsset> {
        let reference = reference
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| AssetError::new(AssetErrorKind::MissingReference))?;

        let path = self.locate(reference)?;

        let metadata = tokio::fs::metadata(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AssetError::new(AssetErrorKind::NotFound(path.display().to_string()))
            } else {
                AssetError::new(AssetErrorKind::Read {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })
            }
        })?;

        if !metadata.is_file() {
            return Err(
                AssetError::new(AssetErrorKind::NotFound(path.display().to_string())).into(),
            );
        }

        self.ensure_inside_root(&path, reference).await?;

        // Size is checked before reading so oversized files are never loaded.
        let size = metadata.len();
        if size == 0 {
            return Err(AssetError::new(AssetErrorKind::Empty(path.display().to_string())).into());
        }
        if size > *self.limits.max_bytes() {
            return Err(AssetError::new(AssetErrorKind::Oversized {
                size,
                limit: *self.limits.max_bytes(),
            })
            .into());
        }

        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            AssetError::new(AssetErrorKind::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?;

        let format = match ImageFormat::detect(&bytes) {
            Some(format) if self.limits.accepts(format) => format,
            Some(format) => {
                return Err(
                    AssetError::new(AssetErrorKind::UnsupportedFormat(format.to_string())).into(),
                );
            }
            None => {
                return Err(AssetError::new(AssetErrorKind::UnsupportedFormat(
                    "unrecognized file header".to_string(),
                ))
                .into());
            }
        };

        let hash = Self::compute_hash(&bytes);

        tracing::info!(
            reference,
            path = %path.display(),
            size,
            format = %format,
            hash = %hash,
            "Resolved image asset"
        );

        Ok(ImageAsset::new(reference, path, format, bytes, hash))
    }
}
