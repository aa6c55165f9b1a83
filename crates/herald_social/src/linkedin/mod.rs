//! LinkedIn REST v2 integration.
//!
//! # Publishing flow
//!
//! 1. `POST /v2/assets?action=registerUpload` registers an image upload and
//!    returns an upload URL plus the asset URN
//! 2. `PUT <uploadUrl>` transfers the binary
//! 3. `POST /v2/posts` creates the post referencing the asset URN
//!
//! Steps 1-2 form `upload_image`, step 3 is `create_post`. A failure in step
//! 3 leaves the uploaded asset orphaned; the caller reports it.

mod client;
mod config;
mod dto;
mod oauth;
mod status;

pub use client::{LinkedInClient, UNRESOLVED_POST_ID};
pub use config::{LINKEDIN_API_BASE, LinkedInConfig, LinkedInConfigBuilder};
pub use dto::{OrganizationAcl, UserInfo};
pub use oauth::{LINKEDIN_OAUTH_BASE, LinkedInOAuth, LinkedInOAuthBuilder, TokenResponse};
