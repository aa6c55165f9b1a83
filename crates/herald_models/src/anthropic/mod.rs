//! Anthropic Messages API.

mod client;
mod dto;

pub use client::{ANTHROPIC_API_BASE, AnthropicClient};
pub use dto::{
    AnthropicContentBlock, AnthropicMessage, AnthropicMessageBuilder, AnthropicRequest,
    AnthropicRequestBuilder, AnthropicResponse, AnthropicUsage,
};
