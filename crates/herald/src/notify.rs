//! Slack webhook notifications.

use herald_error::{HeraldResult, HttpError};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, instrument};

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    text: String,
    username: &'a str,
}

/// Posts run outcomes to a Slack incoming webhook.
#[derive(Clone)]
pub struct SlackNotifier {
    client: Client,
    webhook_url: String,
    username: String,
}

impl SlackNotifier {
    /// Create a notifier for a webhook URL.
    pub fn new(webhook_url: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            webhook_url: webhook_url.into(),
            username: username.into(),
        }
    }

    /// Send one message, prefixed with a success or failure mark.
    #[instrument(skip(self, message))]
    pub async fn notify(&self, message: &str, success: bool) -> HeraldResult<()> {
        let mark = if success { "✅" } else { "❌" };
        let payload = WebhookPayload {
            text: format!("{} {}", mark, message),
            username: &self.username,
        };

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| HttpError::new(format!("Slack webhook failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(HttpError::new(format!(
                "Slack webhook returned {}",
                response.status()
            ))
            .into());
        }

        debug!("Sent Slack notification");
        Ok(())
    }
}

impl std::fmt::Debug for SlackNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackNotifier")
            .field("webhook_url", &"<redacted>")
            .field("username", &self.username)
            .finish()
    }
}
