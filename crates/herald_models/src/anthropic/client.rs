use crate::{AnthropicContentBlock, AnthropicMessage, AnthropicRequest, AnthropicResponse};
use herald_core::{GenerateRequest, GenerateResponse};
use herald_error::{GenerationError, GenerationErrorKind, HeraldResult};
use herald_interface::TextGenerator;
use reqwest::Client;
use tracing::{debug, error, instrument, warn};

/// Default base URL of the Anthropic API.
pub const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic API client.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicClient {
    /// Creates a new Anthropic client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Anthropic API key
    /// * `model` - Model identifier (e.g., "claude-sonnet-4-20250514")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        debug!("Creating new Anthropic client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: ANTHROPIC_API_BASE.to_string(),
        }
    }

    /// Point the client at a different API host (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sends a request to the Anthropic API.
    #[instrument(skip(self, request), fields(model = %request.model()))]
    pub async fn generate_anthropic(
        &self,
        request: &AnthropicRequest,
    ) -> Result<AnthropicResponse, GenerationError> {
        debug!("Sending request to Anthropic API");

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to Anthropic API");
                GenerationError::new(GenerationErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Anthropic API returned error");
            return Err(GenerationError::new(GenerationErrorKind::ApiError {
                status: status.as_u16(),
                message: body,
            }));
        }

        let anthropic_response: AnthropicResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Anthropic response");
            GenerationError::new(GenerationErrorKind::Parse(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        debug!(
            response_id = %anthropic_response.id(),
            output_tokens = anthropic_response.usage().output_tokens(),
            "Received response from Anthropic"
        );
        Ok(anthropic_response)
    }

    /// Converts a Herald GenerateRequest to an Anthropic API request.
    fn convert_request(&self, request: &GenerateRequest) -> Result<AnthropicRequest, GenerationError> {
        let message = AnthropicMessage::builder()
            .role("user")
            .content(vec![AnthropicContentBlock::Text {
                text: request.prompt().clone(),
            }])
            .build()
            .map_err(|e| GenerationError::new(GenerationErrorKind::Builder(e.to_string())))?;

        let system = Some(request.system().clone()).filter(|s| !s.trim().is_empty());

        AnthropicRequest::builder()
            .model(&self.model)
            .max_tokens(*request.max_tokens())
            .system(system)
            .messages(vec![message])
            .build()
            .map_err(|e| GenerationError::new(GenerationErrorKind::Builder(e.to_string())))
    }
}

#[async_trait::async_trait]
impl TextGenerator for AnthropicClient {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn generate(&self, request: &GenerateRequest) -> HeraldResult<GenerateResponse> {
        let anthropic_request = self.convert_request(request)?;
        let anthropic_response = self.generate_anthropic(&anthropic_request).await?;

        if anthropic_response.stop_reason().as_deref() == Some("max_tokens") {
            warn!(
                max_tokens = request.max_tokens(),
                "Generation stopped at the token ceiling; caption may be truncated"
            );
        }

        Ok(GenerateResponse::new(anthropic_response.text_blocks()))
    }

    fn provider_name(&self) -> &'static str {
        "anthropic"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
