//! LinkedIn publishing client.

use super::config::LinkedInConfig;
use super::dto::{
    CreatePostBody, CreatePostResponse, OrganizationAcl, OrganizationAclPage,
    RegisterUploadBody, RegisterUploadResponse, UserInfo,
};
use super::status::{Phase, classify};
use herald_core::{ImageAsset, PostId, UploadHandle};
use herald_error::{HeraldResult, PublishError};
use herald_interface::Publisher;
use reqwest::{Client, RequestBuilder};
use tokio::sync::OnceCell;
use tracing::{debug, error, info, instrument, warn};

const RESTLI_PROTOCOL_VERSION: &str = "2.0.0";

/// Post id recorded when LinkedIn accepts a post but names no id for it.
pub const UNRESOLVED_POST_ID: &str = "urn:li:share:unresolved";

/// LinkedIn REST v2 client implementing [`Publisher`].
///
/// The author URN is resolved lazily and at most once per client; see
/// [`LinkedInConfig`] for the precedence.
#[derive(Debug)]
pub struct LinkedInClient {
    client: Client,
    config: LinkedInConfig,
    author: OnceCell<String>,
}

impl LinkedInClient {
    /// Create a client from explicit configuration.
    pub fn new(config: LinkedInConfig) -> Self {
        debug!(api_base = %config.api_base(), "Creating LinkedIn client");
        Self {
            client: Client::new(),
            config,
            author: OnceCell::new(),
        }
    }

    /// Client configuration.
    pub fn config(&self) -> &LinkedInConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base().trim_end_matches('/'), path)
    }

    /// Attach the headers every REST call carries.
    fn rest(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(self.config.access_token())
            .header("X-Restli-Protocol-Version", RESTLI_PROTOCOL_VERSION)
    }

    /// Author URN of published posts.
    pub async fn author(&self) -> HeraldResult<&str> {
        let author = self
            .author
            .get_or_try_init(|| async {
                match self.config.static_author() {
                    Some(urn) => Ok(urn),
                    None => {
                        debug!("No author configured, looking up member identity");
                        self.userinfo().await.map(|info| info.person_urn())
                    }
                }
            })
            .await?;
        Ok(author.as_str())
    }

    /// Claims of the member the token belongs to.
    ///
    /// # Errors
    ///
    /// `AuthExpired` when the token is rejected, otherwise `UploadFailed`
    /// since identity lookup precedes the upload.
    #[instrument(skip(self))]
    pub async fn userinfo(&self) -> HeraldResult<UserInfo> {
        let response = self
            .client
            .get(self.url("/v2/userinfo"))
            .bearer_auth(self.config.access_token())
            .send()
            .await
            .map_err(|e| {
                PublishError::new(Phase::Upload.transport(format!("userinfo request failed: {}", e)))
            })?;

        if !response.status().is_success() {
            let kind = classify(Phase::Upload, response).await;
            error!(error = %kind, "LinkedIn userinfo lookup failed");
            return Err(PublishError::new(kind).into());
        }

        let info: UserInfo = response.json().await.map_err(|e| {
            PublishError::new(Phase::Upload.transport(format!("invalid userinfo body: {}", e)))
        })?;
        info!(member = %info.sub(), name = ?info.name(), "Authenticated with LinkedIn");
        Ok(info)
    }

    /// Organizations the member holds a role in, for choosing an
    /// organization author URN.
    #[instrument(skip(self))]
    pub async fn organizations(&self) -> HeraldResult<Vec<OrganizationAcl>> {
        let response = self
            .rest(
                self.client
                    .get(self.url("/v2/organizationAcls"))
                    .query(&[("q", "roleAssignee")]),
            )
            .send()
            .await
            .map_err(|e| {
                PublishError::new(Phase::Upload.transport(format!("organizationAcls request failed: {}", e)))
            })?;

        if !response.status().is_success() {
            return Err(PublishError::new(classify(Phase::Upload, response).await).into());
        }

        let page: OrganizationAclPage = response.json().await.map_err(|e| {
            PublishError::new(Phase::Upload.transport(format!("invalid organizationAcls body: {}", e)))
        })?;
        Ok(page.elements)
    }

    async fn register_upload(&self, owner: &str) -> Result<RegisterUploadResponse, PublishError> {
        let response = self
            .rest(
                self.client
                    .post(self.url("/v2/assets"))
                    .query(&[("action", "registerUpload")]),
            )
            .json(&RegisterUploadBody::feed_image(owner))
            .send()
            .await
            .map_err(|e| {
                PublishError::new(Phase::Upload.transport(format!("registerUpload failed: {}", e)))
            })?;

        if !response.status().is_success() {
            let kind = classify(Phase::Upload, response).await;
            error!(error = %kind, "LinkedIn upload registration failed");
            return Err(PublishError::new(kind));
        }

        response.json().await.map_err(|e| {
            PublishError::new(Phase::Upload.transport(format!("invalid registerUpload body: {}", e)))
        })
    }
}

#[async_trait::async_trait]
impl Publisher for LinkedInClient {
    #[instrument(skip(self, asset), fields(image = %asset.reference(), size = asset.size()))]
    async fn upload_image(&self, asset: &ImageAsset) -> HeraldResult<UploadHandle> {
        let owner = self.author().await?;

        info!("Registering image upload with LinkedIn");
        let registration = self.register_upload(owner).await?;
        let upload_url = registration.upload_url().ok_or_else(|| {
            PublishError::new(Phase::Upload.transport(
                "registerUpload response has no HTTP upload mechanism",
            ))
        })?;

        debug!(upload_url, "Uploading image binary");
        let response = self
            .client
            .put(upload_url)
            .bearer_auth(self.config.access_token())
            .header(reqwest::header::CONTENT_TYPE, asset.format().mime_type())
            .body(asset.bytes().clone())
            .send()
            .await
            .map_err(|e| {
                PublishError::new(Phase::Upload.transport(format!("image upload failed: {}", e)))
            })?;

        if !response.status().is_success() {
            let kind = classify(Phase::Upload, response).await;
            error!(error = %kind, "LinkedIn image upload failed");
            return Err(PublishError::new(kind).into());
        }

        info!(asset = %registration.asset(), "Image uploaded");
        Ok(UploadHandle(registration.asset().to_string()))
    }

    #[instrument(skip(self, caption), fields(image = %image, caption_chars = caption.chars().count()))]
    async fn create_post(&self, caption: &str, image: &UploadHandle) -> HeraldResult<PostId> {
        let author = self.author().await?;
        let body = CreatePostBody::public_image_post(
            author,
            caption,
            self.config.media_title(),
            image.0.as_str(),
        );

        info!("Creating LinkedIn post");
        let response = self
            .rest(self.client.post(self.url("/v2/posts")))
            .json(&body)
            .send()
            .await
            .map_err(|e| PublishError::new(Phase::Post.transport(format!("post request failed: {}", e))))?;

        let status = response.status();
        if !status.is_success() {
            let kind = classify(Phase::Post, response).await;
            error!(error = %kind, "LinkedIn post creation failed");
            return Err(PublishError::new(kind).into());
        }

        let header_id = header_value(&response, "x-restli-id");
        let location_id = header_value(&response, reqwest::header::LOCATION.as_str())
            .and_then(|location| id_from_location(&location));

        let post_id = match header_id.or(location_id) {
            Some(id) => id,
            None => {
                let text = response.text().await.unwrap_or_default();
                match serde_json::from_str::<CreatePostResponse>(&text)
                    .ok()
                    .and_then(|r| r.id)
                    .filter(|id| !id.is_empty())
                {
                    Some(id) => id,
                    None => {
                        // The post exists; record it as published so it is not posted again.
                        warn!(status = status.as_u16(), "Post created without an id");
                        UNRESOLVED_POST_ID.to_string()
                    }
                }
            }
        };

        info!(post_id = %post_id, "LinkedIn post created");
        Ok(PostId(post_id))
    }

    fn platform_name(&self) -> &'static str {
        "linkedin"
    }
}

/// Non-empty header value as text.
fn header_value(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Post URN from a `Location` header such as `/v2/posts/urn%3Ali%3Ashare%3A7001`.
fn id_from_location(location: &str) -> Option<String> {
    let segment = location.trim_end_matches('/').rsplit('/').next()?;
    let id = segment.replace("%3A", ":").replace("%3a", ":");
    id.starts_with("urn:").then_some(id)
}
