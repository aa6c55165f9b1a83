//! LinkedIn client configuration.

use derive_getters::Getters;

/// Default LinkedIn REST host.
pub const LINKEDIN_API_BASE: &str = "https://api.linkedin.com";

/// Credentials and identity for the publishing client.
///
/// The author of every post is, in order of preference:
/// 1. `author_urn` as configured (e.g. an organization URN)
/// 2. `urn:li:person:<person_id>`
/// 3. the `sub` claim of `/v2/userinfo`, looked up once per client
#[derive(Clone, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct LinkedInConfig {
    /// OAuth bearer token with the `w_member_social` scope.
    access_token: String,

    /// Explicit author URN.
    #[builder(default)]
    author_urn: Option<String>,

    /// Member id used to build a person URN.
    #[builder(default)]
    person_id: Option<String>,

    /// REST host, without trailing slash.
    #[builder(default = "LINKEDIN_API_BASE.to_string()")]
    api_base: String,

    /// Title attached to the image in the post body.
    #[builder(default = "\"Bioscope.AI\".to_string()")]
    media_title: String,
}

impl LinkedInConfig {
    /// Create a builder for LinkedIn configuration.
    pub fn builder() -> LinkedInConfigBuilder {
        LinkedInConfigBuilder::default()
    }

    /// The author URN when it is known without a network call.
    pub fn static_author(&self) -> Option<String> {
        self.author_urn
            .as_deref()
            .map(str::trim)
            .filter(|urn| !urn.is_empty())
            .map(str::to_string)
            .or_else(|| {
                self.person_id
                    .as_deref()
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(|id| format!("urn:li:person:{}", id))
            })
    }
}

impl std::fmt::Debug for LinkedInConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedInConfig")
            .field("access_token", &"<redacted>")
            .field("author_urn", &self.author_urn)
            .field("person_id", &self.person_id)
            .field("api_base", &self.api_base)
            .field("media_title", &self.media_title)
            .finish()
    }
}
