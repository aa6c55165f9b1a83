//! Request and response types for text generation.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A single-turn generation request: a style directive plus one user prompt.
///
/// # Examples
///
/// ```
/// use herald_core::GenerateRequest;
///
/// let request = GenerateRequest::builder()
///     .system("You write LinkedIn posts.")
///     .prompt("Gene: COMT")
///     .max_tokens(1500u32)
///     .build()
///     .unwrap();
///
/// assert_eq!(*request.max_tokens(), 1500);
/// ```
#[derive(
    Debug, Clone, PartialEq, Getters, Serialize, Deserialize, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct GenerateRequest {
    /// Fixed style directive (system prompt)
    system: String,
    /// User prompt carrying the entry's content
    prompt: String,
    /// Maximum number of tokens to generate
    max_tokens: u32,
}

impl GenerateRequest {
    /// Create a builder for a generation request.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// Text returned by the generator.
///
/// # Examples
///
/// ```
/// use herald_core::GenerateResponse;
///
/// let response = GenerateResponse::new(vec!["Hello".into(), " world".into()]);
/// assert_eq!(response.text(), "Hello world");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Text blocks in the order the model produced them
    pub outputs: Vec<String>,
}

impl GenerateResponse {
    /// Wrap generated text blocks.
    pub fn new(outputs: Vec<String>) -> Self {
        Self { outputs }
    }

    /// All text blocks concatenated.
    pub fn text(&self) -> String {
        self.outputs.concat()
    }
}
