//! Social platform integrations for Herald.
//!
//! The publishing boundary is the [`herald_interface::Publisher`] trait. The
//! only platform wired in is LinkedIn:
//! - [`LinkedInClient`] uploads images and creates posts over REST v2
//! - [`LinkedInOAuth`] is the credential maintenance side (authorization
//!   URL, code exchange); it is never used by a dispatcher run
//!
//! # Example
//!
//! ```rust,no_run
//! use herald_social::{LinkedInClient, LinkedInConfig};
//! use herald_interface::Publisher;
//!
//! # async fn example(asset: herald_core::ImageAsset) -> Result<(), Box<dyn std::error::Error>> {
//! let config = LinkedInConfig::builder()
//!     .access_token(std::env::var("LINKEDIN_ACCESS_TOKEN")?)
//!     .build()?;
//! let client = LinkedInClient::new(config);
//!
//! let handle = client.upload_image(&asset).await?;
//! let post_id = client.create_post("Hello LinkedIn", &handle).await?;
//! println!("Created {}", post_id);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod linkedin;

pub use linkedin::{
    LINKEDIN_API_BASE, LINKEDIN_OAUTH_BASE, LinkedInClient, LinkedInConfig,
    LinkedInConfigBuilder, LinkedInOAuth, LinkedInOAuthBuilder, OrganizationAcl, TokenResponse,
    UNRESOLVED_POST_ID, UserInfo,
};
