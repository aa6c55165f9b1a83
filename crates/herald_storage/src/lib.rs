//! Image asset resolution for Herald.
//!
//! Calendar entries name their image by file name. An [`AssetStore`] turns
//! that reference into a validated [`ImageAsset`](herald_core::ImageAsset):
//! present, inside the asset directory, in an accepted format and under the
//! size ceiling.
//!
//! # Example
//!
//! ```rust,no_run
//! use herald_storage::{AssetLimits, AssetStore, FileSystemAssetStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileSystemAssetStore::new("content/images", AssetLimits::default());
//! let asset = store.resolve(Some("week1_sun_comt.jpg")).await?;
//! println!("{} bytes, sha256 {}", asset.size(), asset.sha256());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod limits;

pub use filesystem::FileSystemAssetStore;
pub use limits::{AssetLimits, AssetLimitsBuilder, DEFAULT_MAX_IMAGE_BYTES};

use herald_core::ImageAsset;
use herald_error::HeraldResult;

/// Source of validated image assets.
#[async_trait::async_trait]
pub trait AssetStore: Send + Sync {
    /// Locate and validate the asset named by a calendar entry.
    ///
    /// # Errors
    ///
    /// - `AssetMissing` when the reference is absent or names no file
    /// - `AssetInvalid` when the file escapes the store, is empty, oversized
    ///   or not in an accepted format
    async fn resolve(&self, reference: Option<&str>) -> HeraldResult<ImageAsset>;
}
