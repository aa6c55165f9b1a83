//! Caption rendering.

use herald_core::{CalendarEntry, GenerateRequest};
use herald_error::{GenerationError, GenerationErrorKind, HeraldResult};
use herald_interface::TextGenerator;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Turns a calendar entry into a caption with one generation call.
#[derive(Clone)]
pub struct CaptionRenderer {
    generator: Arc<dyn TextGenerator>,
    system_prompt: String,
    max_tokens: u32,
    caption_limit: usize,
}

impl CaptionRenderer {
    /// Create a renderer.
    ///
    /// # Arguments
    ///
    /// * `generator` - Text-generation boundary
    /// * `system_prompt` - Fixed style directive
    /// * `max_tokens` - Token ceiling for the single call
    /// * `caption_limit` - Longest acceptable caption, in characters
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        system_prompt: impl Into<String>,
        max_tokens: u32,
        caption_limit: usize,
    ) -> Self {
        Self {
            generator,
            system_prompt: system_prompt.into(),
            max_tokens,
            caption_limit,
        }
    }

    /// User prompt for an entry.
    pub fn prompt_for(&self, entry: &CalendarEntry) -> String {
        let category = entry.category();
        let fields = serde_json::to_string_pretty(entry.fields())
            .unwrap_or_else(|_| format!("{:?}", entry.fields()));
        let week = entry
            .week()
            .map(|w| w.to_string())
            .unwrap_or_else(|| "n/a".to_string());

        format!(
            "Generate a LinkedIn post for the following content:\n\
             \n\
             Post Type: {category}\n\
             Week: {week}\n\
             Title: {title}\n\
             \n\
             Content Data:\n\
             {fields}\n\
             \n\
             Remember to:\n\
             1. Start with an engaging hook\n\
             2. Use the {emoji} emoji for this post type\n\
             3. Include key information in an accessible way\n\
             4. End with the dual CTA for physicians and patients\n\
             5. Finish with these hashtags: {hashtags}\n\
             6. Keep under {limit} characters total\n",
            title = entry.display_title(),
            emoji = category.emoji(),
            hashtags = category.hashtags(),
            limit = self.caption_limit,
        )
    }

    /// Generate the caption for an entry.
    ///
    /// # Errors
    ///
    /// `GenerationFailed` when the call fails, or the text is empty or longer
    /// than the caption limit. The call is never retried.
    #[instrument(skip(self, entry), fields(
        entry = %entry.identifier(),
        provider = self.generator.provider_name(),
        model = self.generator.model_name(),
    ))]
    pub async fn render(&self, entry: &CalendarEntry) -> HeraldResult<String> {
        let request = GenerateRequest::builder()
            .system(self.system_prompt.clone())
            .prompt(self.prompt_for(entry))
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| GenerationError::new(GenerationErrorKind::Builder(e.to_string())))?;

        debug!(prompt_chars = request.prompt().len(), "Requesting caption");
        let response = self.generator.generate(&request).await?;

        let caption = response.text().trim().to_string();
        if caption.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyOutput).into());
        }

        let length = caption.chars().count();
        if length > self.caption_limit {
            return Err(GenerationError::new(GenerationErrorKind::TooLong {
                length,
                limit: self.caption_limit,
            })
            .into());
        }

        info!(caption_chars = length, "Generated caption");
        Ok(caption)
    }
}

impl std::fmt::Debug for CaptionRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionRenderer")
            .field("provider", &self.generator.provider_name())
            .field("model", &self.generator.model_name())
            .field("max_tokens", &self.max_tokens)
            .field("caption_limit", &self.caption_limit)
            .finish()
    }
}
