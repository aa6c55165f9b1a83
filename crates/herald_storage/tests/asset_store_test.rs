//! Tests for the filesystem asset store.

use herald_core::ImageFormat;
use herald_error::FailureKind;
use herald_storage::{AssetLimits, AssetStore, FileSystemAssetStore};
use tempfile::TempDir;

/// Smallest header `ImageFormat::detect` recognizes as JPEG, plus filler.
fn jpeg_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.resize(len.max(4), 0x00);
    bytes
}

fn png_bytes() -> Vec<u8> {
    vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0]
}

fn store(dir: &TempDir) -> FileSystemAssetStore {
    FileSystemAssetStore::new(dir.path(), AssetLimits::default())
}

#[tokio::test]
async fn test_resolves_valid_jpeg() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("week1_sun_comt.jpg"), jpeg_bytes(2048)).unwrap();

    let asset = store(&dir)
        .resolve(Some("week1_sun_comt.jpg"))
        .await
        .unwrap();

    assert_eq!(*asset.format(), ImageFormat::Jpeg);
    assert_eq!(asset.size(), 2048);
    assert_eq!(asset.sha256().len(), 64);
    assert_eq!(asset.reference(), "week1_sun_comt.jpg");
}

#[tokio::test]
async fn test_missing_file_is_asset_missing() {
    let dir = TempDir::new().unwrap();

    let err = store(&dir)
        .resolve(Some("week1_sun_comt.jpg"))
        .await
        .unwrap_err();

    assert_eq!(err.failure_kind(), Some(FailureKind::AssetMissing));
}

#[tokio::test]
async fn test_missing_reference_is_asset_missing() {
    let dir = TempDir::new().unwrap();

    for reference in [None, Some(""), Some("   ")] {
        let err = store(&dir).resolve(reference).await.unwrap_err();
        assert_eq!(err.failure_kind(), Some(FailureKind::AssetMissing));
    }
}

#[tokio::test]
async fn test_oversized_file_is_asset_invalid() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("big.jpg"), jpeg_bytes(4096)).unwrap();

    let limits = AssetLimits::builder().max_bytes(1024u64).build().unwrap();
    let store = FileSystemAssetStore::new(dir.path(), limits);
    let err = store.resolve(Some("big.jpg")).await.unwrap_err();

    assert_eq!(err.failure_kind(), Some(FailureKind::AssetInvalid));
}

#[tokio::test]
async fn test_wrong_format_is_asset_invalid() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("chart.jpg"), png_bytes()).unwrap();
    std::fs::write(dir.path().join("notes.jpg"), b"not an image at all").unwrap();

    for name in ["chart.jpg", "notes.jpg"] {
        let err = store(&dir).resolve(Some(name)).await.unwrap_err();
        assert_eq!(err.failure_kind(), Some(FailureKind::AssetInvalid), "{name}");
    }
}

#[tokio::test]
async fn test_empty_file_is_asset_invalid() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("empty.jpg"), b"").unwrap();

    let err = store(&dir).resolve(Some("empty.jpg")).await.unwrap_err();
    assert_eq!(err.failure_kind(), Some(FailureKind::AssetInvalid));
}

#[tokio::test]
async fn test_reference_cannot_escape_root() {
    let dir = TempDir::new().unwrap();
    let images = dir.path().join("images");
    std::fs::create_dir(&images).unwrap();
    std::fs::write(dir.path().join("secret.jpg"), jpeg_bytes(16)).unwrap();

    let store = FileSystemAssetStore::new(&images, AssetLimits::default());
    for reference in ["../secret.jpg", "/etc/passwd"] {
        let err = store.resolve(Some(reference)).await.unwrap_err();
        assert_eq!(err.failure_kind(), Some(FailureKind::AssetInvalid), "{reference}");
    }
}

#[tokio::test]
async fn test_png_accepted_when_configured() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("chart.png"), png_bytes()).unwrap();

    let limits = AssetLimits::builder()
        .formats(vec![ImageFormat::Jpeg, ImageFormat::Png])
        .build()
        .unwrap();
    let store = FileSystemAssetStore::new(dir.path(), limits);
    let asset = store.resolve(Some("chart.png")).await.unwrap();

    assert_eq!(asset.format().mime_type(), "image/png");
}
