//! Wire types for the LinkedIn REST v2 endpoints Herald calls.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const FEEDSHARE_IMAGE_RECIPE: &str = "urn:li:digitalmediaRecipe:feedshare-image";
const USER_GENERATED_CONTENT: &str = "urn:li:userGeneratedContent";
const UPLOAD_MECHANISM: &str = "com.linkedin.digitalmedia.uploading.MediaUploadHttpRequest";

// ============================================================================
// registerUpload
// ============================================================================

/// Body of `POST /v2/assets?action=registerUpload`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterUploadBody {
    register_upload_request: RegisterUploadRequest,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterUploadRequest {
    recipes: Vec<String>,
    owner: String,
    service_relationships: Vec<ServiceRelationship>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ServiceRelationship {
    relationship_type: String,
    identifier: String,
}

impl RegisterUploadBody {
    /// Register a feed image owned by `owner`.
    pub(crate) fn feed_image(owner: impl Into<String>) -> Self {
        Self {
            register_upload_request: RegisterUploadRequest {
                recipes: vec![FEEDSHARE_IMAGE_RECIPE.to_string()],
                owner: owner.into(),
                service_relationships: vec![ServiceRelationship {
                    relationship_type: "OWNER".to_string(),
                    identifier: USER_GENERATED_CONTENT.to_string(),
                }],
            },
        }
    }
}

/// Response of `registerUpload`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RegisterUploadResponse {
    value: RegisterUploadValue,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterUploadValue {
    asset: String,
    upload_mechanism: HashMap<String, UploadMechanism>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadMechanism {
    upload_url: String,
}

impl RegisterUploadResponse {
    /// Asset URN later referenced by the post.
    pub(crate) fn asset(&self) -> &str {
        &self.value.asset
    }

    /// Where the binary goes, if the HTTP upload mechanism was offered.
    pub(crate) fn upload_url(&self) -> Option<&str> {
        self.value
            .upload_mechanism
            .get(UPLOAD_MECHANISM)
            .map(|m| m.upload_url.as_str())
    }
}

// ============================================================================
// posts
// ============================================================================

/// Body of `POST /v2/posts`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePostBody {
    author: String,
    commentary: String,
    visibility: String,
    distribution: Distribution,
    content: PostContent,
    lifecycle_state: String,
    is_reshare_disabled_by_author: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Distribution {
    feed_distribution: String,
    target_entities: Vec<serde_json::Value>,
    third_party_distribution_channels: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
struct PostContent {
    media: PostMedia,
}

#[derive(Debug, Clone, Serialize)]
struct PostMedia {
    title: String,
    id: String,
}

impl CreatePostBody {
    /// A public main-feed post with one image.
    pub(crate) fn public_image_post(
        author: impl Into<String>,
        commentary: impl Into<String>,
        media_title: impl Into<String>,
        asset: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            commentary: commentary.into(),
            visibility: "PUBLIC".to_string(),
            distribution: Distribution {
                feed_distribution: "MAIN_FEED".to_string(),
                target_entities: Vec::new(),
                third_party_distribution_channels: Vec::new(),
            },
            content: PostContent {
                media: PostMedia {
                    title: media_title.into(),
                    id: asset.into(),
                },
            },
            lifecycle_state: "PUBLISHED".to_string(),
            is_reshare_disabled_by_author: false,
        }
    }
}

/// Body returned by post creation. The id usually arrives in the
/// `x-restli-id` header instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CreatePostResponse {
    #[serde(default)]
    pub(crate) id: Option<String>,
}

// ============================================================================
// identity
// ============================================================================

/// OpenID `userinfo` claims.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct UserInfo {
    /// Member id.
    sub: String,
    /// Display name.
    #[serde(default)]
    name: Option<String>,
    /// Primary email, when the scope allows it.
    #[serde(default)]
    email: Option<String>,
}

impl UserInfo {
    /// Person URN for this member.
    pub fn person_urn(&self) -> String {
        format!("urn:li:person:{}", self.sub)
    }
}

/// One organization role held by the member.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationAcl {
    /// Organization URN.
    organization: String,
    /// Role, e.g. `ADMINISTRATOR`.
    #[serde(default)]
    role: Option<String>,
    /// Approval state, e.g. `APPROVED`.
    #[serde(default)]
    state: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OrganizationAclPage {
    #[serde(default)]
    pub(crate) elements: Vec<OrganizationAcl>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn register_body_matches_wire_shape() {
        let body = serde_json::to_value(RegisterUploadBody::feed_image("urn:li:person:abc")).unwrap();
        assert_eq!(
            body,
            json!({
                "registerUploadRequest": {
                    "recipes": ["urn:li:digitalmediaRecipe:feedshare-image"],
                    "owner": "urn:li:person:abc",
                    "serviceRelationships": [{
                        "relationshipType": "OWNER",
                        "identifier": "urn:li:userGeneratedContent"
                    }]
                }
            })
        );
    }

    #[test]
    fn register_response_exposes_upload_url() {
        let response: RegisterUploadResponse = serde_json::from_value(json!({
            "value": {
                "asset": "urn:li:digitalmediaAsset:C4E",
                "mediaArtifact": "urn:li:digitalmediaMediaArtifact:(x)",
                "uploadMechanism": {
                    "com.linkedin.digitalmedia.uploading.MediaUploadHttpRequest": {
                        "uploadUrl": "https://api.linkedin.com/mediaUpload/C4E",
                        "headers": {"media-type-family": "STILLIMAGE"}
                    }
                }
            }
        }))
        .unwrap();

        assert_eq!(response.asset(), "urn:li:digitalmediaAsset:C4E");
        assert_eq!(
            response.upload_url(),
            Some("https://api.linkedin.com/mediaUpload/C4E")
        );
    }

    #[test]
    fn post_body_is_public_main_feed() {
        let body = serde_json::to_value(CreatePostBody::public_image_post(
            "urn:li:person:abc",
            "caption",
            "Bioscope.AI",
            "urn:li:digitalmediaAsset:C4E",
        ))
        .unwrap();

        assert_eq!(body["visibility"], "PUBLIC");
        assert_eq!(body["lifecycleState"], "PUBLISHED");
        assert_eq!(body["isReshareDisabledByAuthor"], false);
        assert_eq!(body["distribution"]["feedDistribution"], "MAIN_FEED");
        assert_eq!(body["content"]["media"]["id"], "urn:li:digitalmediaAsset:C4E");
    }
}
