//! OAuth 2.0 authorization-code flow for obtaining a LinkedIn access token.
//!
//! This is credential maintenance, run by an operator when the token expires.
//! It is independent of the publishing pipeline.

use derive_getters::Getters;
use herald_error::{AuthError, AuthErrorKind, HeraldResult};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

/// Default LinkedIn OAuth host.
pub const LINKEDIN_OAUTH_BASE: &str = "https://www.linkedin.com";

/// OAuth application settings.
#[derive(Clone, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct LinkedInOAuth {
    /// Application client id.
    client_id: String,
    /// Application client secret.
    client_secret: String,
    /// Registered redirect URI.
    #[builder(default = "\"http://localhost:8000/callback\".to_string()")]
    redirect_uri: String,
    /// Requested scopes.
    #[builder(default = "vec![\"w_member_social\".to_string()]")]
    scopes: Vec<String>,
    /// Opaque state echoed back on the callback.
    #[builder(default = "\"herald_linkedin_auth\".to_string()")]
    state: String,
    /// OAuth host, without trailing slash.
    #[builder(default = "LINKEDIN_OAUTH_BASE.to_string()")]
    oauth_base: String,
}

/// Token endpoint response.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer token.
    access_token: String,
    /// Lifetime in seconds.
    expires_in: u64,
    /// Refresh token, only issued to approved applications.
    #[serde(default)]
    refresh_token: Option<String>,
    /// Granted scopes.
    #[serde(default)]
    scope: Option<String>,
}

impl TokenResponse {
    /// Lifetime in whole days.
    pub fn expires_in_days(&self) -> u64 {
        self.expires_in / 86_400
    }
}

impl LinkedInOAuth {
    /// Create a builder for OAuth settings.
    pub fn builder() -> LinkedInOAuthBuilder {
        LinkedInOAuthBuilder::default()
    }

    /// URL the operator opens to authorize the application.
    pub fn authorization_url(&self) -> HeraldResult<Url> {
        let mut url = Url::parse(&format!("{}/oauth/v2/authorization", self.oauth_base))
            .map_err(|e| AuthError::new(AuthErrorKind::Parse(e.to_string())))?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", &self.scopes.join(" "))
            .append_pair("state", &self.state);
        Ok(url)
    }

    /// Exchange an authorization code for an access token.
    #[instrument(skip(self, code))]
    pub async fn exchange_code(&self, code: &str) -> HeraldResult<TokenResponse> {
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let response = Client::new()
            .post(format!("{}/oauth/v2/accessToken", self.oauth_base))
            .form(&form)
            .send()
            .await
            .map_err(|e| AuthError::new(AuthErrorKind::Http(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Token exchange rejected");
            return Err(AuthError::new(AuthErrorKind::Rejected {
                status: status.as_u16(),
                message: body,
            })
            .into());
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::new(AuthErrorKind::Parse(e.to_string())))?;
        info!(expires_in_days = token.expires_in_days(), "Obtained access token");
        Ok(token)
    }
}

impl std::fmt::Debug for LinkedInOAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedInOAuth")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .field("oauth_base", &self.oauth_base)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_url_requests_member_social_scope() {
        let oauth = LinkedInOAuth::builder()
            .client_id("client-123")
            .client_secret("secret")
            .build()
            .unwrap();

        let url = oauth.authorization_url().unwrap();
        assert_eq!(url.path(), "/oauth/v2/authorization");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("client_id".into(), "client-123".into())));
        assert!(pairs.contains(&("scope".into(), "w_member_social".into())));
        assert!(pairs.contains(&(
            "redirect_uri".into(),
            "http://localhost:8000/callback".into()
        )));
    }

    #[test]
    fn token_lifetime_in_days() {
        let token: TokenResponse =
            serde_json::from_str(r#"{"access_token":"AQX","expires_in":5184000}"#).unwrap();
        assert_eq!(token.expires_in_days(), 60);
        assert_eq!(token.refresh_token(), &None);
    }
}
