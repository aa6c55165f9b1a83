//! Trait definitions for the text-generation and publishing boundaries.

use async_trait::async_trait;
use herald_core::{GenerateRequest, GenerateResponse, ImageAsset, PostId, UploadHandle};
use herald_error::HeraldResult;

/// Text-generation boundary: one request in, one text response out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a request. Called at most once per run.
    async fn generate(&self, req: &GenerateRequest) -> HeraldResult<GenerateResponse>;

    /// Provider name (e.g., "anthropic").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "claude-sonnet-4-20250514").
    fn model_name(&self) -> &str;
}

/// Publishing boundary: upload an image, then create a post referencing it.
///
/// The two calls are sequential and not atomic. Callers must not repeat
/// `upload_image` after a failed `create_post`.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Upload an image and return the handle post creation refers to.
    ///
    /// # Errors
    ///
    /// Returns `AuthExpired`, `RateLimited` or `UploadFailed` publish errors.
    async fn upload_image(&self, asset: &ImageAsset) -> HeraldResult<UploadHandle>;

    /// Create a post with the caption and the uploaded image.
    ///
    /// # Errors
    ///
    /// Returns `AuthExpired`, `RateLimited` or `PostFailed` publish errors.
    async fn create_post(&self, caption: &str, image: &UploadHandle) -> HeraldResult<PostId>;

    /// Platform name (e.g., "linkedin").
    fn platform_name(&self) -> &'static str;
}
