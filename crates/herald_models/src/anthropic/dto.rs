//! Wire types for the Anthropic Messages API.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Content block in a message or response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicContentBlock {
    /// Plain text
    Text {
        /// The text
        text: String,
    },
    /// Any block type Herald does not use (tool use, thinking, ...)
    #[serde(other)]
    Other,
}

/// One conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct AnthropicMessage {
    /// "user" or "assistant"
    role: String,
    /// Content blocks
    content: Vec<AnthropicContentBlock>,
}

impl AnthropicMessage {
    /// Create a builder for a message.
    pub fn builder() -> AnthropicMessageBuilder {
        AnthropicMessageBuilder::default()
    }
}

/// Request body for `POST /v1/messages`.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct AnthropicRequest {
    /// Model identifier
    model: String,
    /// Maximum tokens to generate
    max_tokens: u32,
    /// System prompt
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    /// Conversation turns
    messages: Vec<AnthropicMessage>,
}

impl AnthropicRequest {
    /// Create a builder for a request.
    pub fn builder() -> AnthropicRequestBuilder {
        AnthropicRequestBuilder::default()
    }
}

/// Token accounting returned with each response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct AnthropicUsage {
    /// Prompt tokens
    #[serde(default)]
    input_tokens: u32,
    /// Generated tokens
    #[serde(default)]
    output_tokens: u32,
}

/// Response body for `POST /v1/messages`.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AnthropicResponse {
    /// Message id
    id: String,
    /// Model that answered
    #[serde(default)]
    model: String,
    /// Content blocks
    #[serde(default)]
    content: Vec<AnthropicContentBlock>,
    /// Why generation stopped ("end_turn", "max_tokens", ...)
    #[serde(default)]
    stop_reason: Option<String>,
    /// Token usage
    #[serde(default)]
    usage: AnthropicUsage,
}

impl AnthropicResponse {
    /// Text blocks in order, skipping other block types.
    pub fn text_blocks(&self) -> Vec<String> {
        self.content
            .iter()
            .filter_map(|block| match block {
                AnthropicContentBlock::Text { text } => Some(text.clone()),
                AnthropicContentBlock::Other => None,
            })
            .collect()
    }
}
