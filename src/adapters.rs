//! Host adapters: Discord REST delivery for chat handlers and status reports.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use dislogger_logging::{ChatNotifier, HandlerError, REQUEST_TIMEOUT, http_client};

const DISCORD_API: &str = "https://discord.com/api/v10";

/// Discord rejects messages longer than this.
const MAX_MESSAGE_CHARS: usize = 2000;

const CODE_FENCE: &str = "```";

/// Posts messages to Discord channels with a bot token.
pub(crate) struct DiscordNotifier {
    token: String,
    api_base: String,
    client: reqwest::Client,
}

impl DiscordNotifier {
    pub(crate) fn new(token: impl Into<String>) -> Result<Self, HandlerError> {
        Self::with_endpoint(token, DISCORD_API, REQUEST_TIMEOUT)
    }

    fn with_endpoint(
        token: impl Into<String>,
        api_base: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, HandlerError> {
        Ok(Self {
            token: token.into(),
            api_base: api_base.into(),
            client: http_client(timeout)?,
        })
    }
}

#[async_trait]
impl ChatNotifier for DiscordNotifier {
    async fn send_message(&self, channel_id: &str, content: &str) -> Result<(), HandlerError> {
        let url = format!("{}/channels/{}/messages", self.api_base, channel_id);
        let payload = serde_json::json!({ "content": truncate(content) });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bot {}", self.token))
            .json(&payload)
            .send()
            .await
            .map_err(|e| HandlerError::Delivery(format!("Discord request failed: {}", e)))?;

        if response.status().is_success() {
            debug!("Discord message sent to channel {}", channel_id);
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(HandlerError::Delivery(format!(
                "Discord returned {} for channel {}: {}",
                status, channel_id, body
            )))
        }
    }
}

/// Shorten `content` to the Discord limit. A message that closes a code
/// fence still closes it after shortening.
fn truncate(content: &str) -> String {
    if content.chars().count() <= MAX_MESSAGE_CHARS {
        return content.to_string();
    }
    if !content.trim_end().ends_with(CODE_FENCE) {
        return content.chars().take(MAX_MESSAGE_CHARS).collect();
    }

    let closing = format!("\n{}", CODE_FENCE);
    let keep = MAX_MESSAGE_CHARS - closing.chars().count();
    let mut shortened: String = content.chars().take(keep).collect();
    shortened.push_str(&closing);
    shortened
}
