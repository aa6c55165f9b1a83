//! HTTP contract tests for the LinkedIn publishing client.

use herald_core::{ImageAsset, ImageFormat, UploadHandle};
use herald_error::{FailureKind, HeraldErrorKind, PublishErrorKind};
use herald_interface::Publisher;
use herald_social::{LinkedInClient, LinkedInConfig, UNRESOLVED_POST_ID};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ASSET_URN: &str = "urn:li:digitalmediaAsset:C4E10AQ";

fn asset() -> ImageAsset {
    ImageAsset::new(
        "week1_sun_comt.jpg",
        "content/images/week1_sun_comt.jpg",
        ImageFormat::Jpeg,
        vec![0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0],
        "0".repeat(64),
    )
}

fn client(server: &MockServer, person_id: Option<&str>) -> LinkedInClient {
    let config = LinkedInConfig::builder()
        .access_token("test-token")
        .person_id(person_id.map(str::to_string))
        .api_base(server.uri())
        .build()
        .unwrap();
    LinkedInClient::new(config)
}

async fn mount_register(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v2/assets"))
        .and(query_param("action", "registerUpload"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("x-restli-protocol-version", "2.0.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": {
                "asset": ASSET_URN,
                "uploadMechanism": {
                    "com.linkedin.digitalmedia.uploading.MediaUploadHttpRequest": {
                        "uploadUrl": format!("{}/mediaUpload/C4E10AQ", server.uri())
                    }
                }
            }
        })))
        .mount(server)
        .await;
}

async fn mount_binary_upload(server: &MockServer, status: u16) {
    Mock::given(method("PUT"))
        .and(path("/mediaUpload/C4E10AQ"))
        .and(header("content-type", "image/jpeg"))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(server)
        .await;
}

fn publish_kind(err: &herald_error::HeraldError) -> &PublishErrorKind {
    match err.kind() {
        HeraldErrorKind::Publish(e) => &e.kind,
        other => panic!("expected publish error, got {other}"),
    }
}

#[tokio::test]
async fn test_upload_then_post_returns_post_id() {
    let server = MockServer::start().await;
    mount_register(&server).await;
    mount_binary_upload(&server, 201).await;

    Mock::given(method("POST"))
        .and(path("/v2/posts"))
        .and(header("x-restli-protocol-version", "2.0.0"))
        .and(body_partial_json(json!({
            "author": "urn:li:person:abc123",
            "commentary": "🧬 Meet COMT",
            "visibility": "PUBLIC",
            "content": {"media": {"id": ASSET_URN}},
            "lifecycleState": "PUBLISHED"
        })))
        .respond_with(ResponseTemplate::new(201).insert_header("x-restli-id", "urn:li:share:7001"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, Some("abc123"));
    let handle = client.upload_image(&asset()).await.unwrap();
    assert_eq!(handle, UploadHandle(ASSET_URN.to_string()));

    let post_id = client.create_post("🧬 Meet COMT", &handle).await.unwrap();
    assert_eq!(post_id.0, "urn:li:share:7001");
    assert_eq!(client.platform_name(), "linkedin");
}

#[tokio::test]
async fn test_identity_is_looked_up_once() {
    let server = MockServer::start().await;
    mount_register(&server).await;
    mount_binary_upload(&server, 200).await;

    Mock::given(method("GET"))
        .and(path("/v2/userinfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sub": "looked-up",
            "name": "Bioscope Bot"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v2/posts"))
        .and(body_partial_json(json!({"author": "urn:li:person:looked-up"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "urn:li:share:42"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, None);
    let handle = client.upload_image(&asset()).await.unwrap();
    let post_id = client.create_post("caption", &handle).await.unwrap();

    assert_eq!(post_id.0, "urn:li:share:42");
}

#[tokio::test]
async fn test_post_id_falls_back_to_location_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/posts"))
        .respond_with(
            ResponseTemplate::new(201).insert_header("location", "/v2/posts/urn%3Ali%3Ashare%3A7002"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let post_id = client(&server, Some("abc123"))
        .create_post("caption", &UploadHandle(ASSET_URN.to_string()))
        .await
        .unwrap();

    assert_eq!(post_id.0, "urn:li:share:7002");
}

#[tokio::test]
async fn test_created_post_without_id_still_counts_as_created() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/posts"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let post_id = client(&server, Some("abc123"))
        .create_post("caption", &UploadHandle(ASSET_URN.to_string()))
        .await
        .unwrap();

    assert_eq!(post_id.0, UNRESOLVED_POST_ID);
}

#[tokio::test]
async fn test_unauthorized_registration_is_auth_expired() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/assets"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Expired access token"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server, Some("abc123"))
        .upload_image(&asset())
        .await
        .unwrap_err();

    assert_eq!(err.failure_kind(), Some(FailureKind::AuthExpired));
}

#[tokio::test]
async fn test_failed_binary_transfer_is_upload_failed() {
    let server = MockServer::start().await;
    mount_register(&server).await;
    mount_binary_upload(&server, 500).await;

    let err = client(&server, Some("abc123"))
        .upload_image(&asset())
        .await
        .unwrap_err();

    assert_eq!(err.failure_kind(), Some(FailureKind::UploadFailed));
    assert!(matches!(
        publish_kind(&err),
        PublishErrorKind::UploadFailed { status: Some(500), .. }
    ));
}

#[tokio::test]
async fn test_throttled_post_is_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/posts"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "30")
                .set_body_string("Too Many Requests"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server, Some("abc123"))
        .create_post("caption", &UploadHandle(ASSET_URN.to_string()))
        .await
        .unwrap_err();

    assert_eq!(err.failure_kind(), Some(FailureKind::RateLimited));
    assert!(matches!(
        publish_kind(&err),
        PublishErrorKind::RateLimited { retry_after_secs: Some(30), .. }
    ));
}

#[tokio::test]
async fn test_rejected_post_is_post_failed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/posts"))
        .respond_with(ResponseTemplate::new(422).set_body_string("commentary too long"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server, Some("abc123"))
        .create_post("caption", &UploadHandle(ASSET_URN.to_string()))
        .await
        .unwrap_err();

    assert_eq!(err.failure_kind(), Some(FailureKind::PostFailed));
    assert!(err.to_string().contains("commentary too long"));
}

#[tokio::test]
async fn test_whoami_lists_identity() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/userinfo"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sub": "abc123",
            "name": "Bioscope Bot",
            "email": "bot@example.com"
        })))
        .mount(&server)
        .await;

    let info = client(&server, None).userinfo().await.unwrap();
    assert_eq!(info.person_urn(), "urn:li:person:abc123");
    assert_eq!(info.name().as_deref(), Some("Bioscope Bot"));
}
