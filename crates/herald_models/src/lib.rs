//! Text-generation provider integrations for Herald.
//!
//! Only the Anthropic Messages API is wired in; it implements
//! [`herald_interface::TextGenerator`].
//!
//! # Example
//!
//! ```no_run
//! use herald_models::AnthropicClient;
//! use herald_interface::TextGenerator;
//! use herald_core::GenerateRequest;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AnthropicClient::new("sk-ant-...", "claude-sonnet-4-20250514");
//! let request = GenerateRequest::builder()
//!     .system("You write LinkedIn posts.")
//!     .prompt("Gene: COMT")
//!     .max_tokens(1500u32)
//!     .build()?;
//! let response = client.generate(&request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod anthropic;

pub use anthropic::{
    ANTHROPIC_API_BASE, AnthropicClient, AnthropicContentBlock, AnthropicMessage,
    AnthropicMessageBuilder, AnthropicRequest, AnthropicRequestBuilder, AnthropicResponse,
    AnthropicUsage,
};
