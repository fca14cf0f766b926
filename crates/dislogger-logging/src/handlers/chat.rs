//! Chat channel handler.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::runtime::Handle;
use tracing::warn;

use crate::error::HandlerError;
use crate::formatter::Formatter;
use crate::handler::Handler;
use crate::level::Level;
use crate::record::LogRecord;

/// Send primitive provided by the host chat runtime.
#[async_trait]
pub trait ChatNotifier: Send + Sync {
    /// Post `content` to the channel identified by `channel_id`.
    async fn send_message(&self, channel_id: &str, content: &str) -> Result<(), HandlerError>;
}

/// Posts formatted records to one chat channel.
///
/// `emit` only submits the send to the runtime; it never waits for delivery
/// and never retries a failed one.
pub struct ChatHandler {
    name: String,
    level: Level,
    formatter: Arc<Formatter>,
    notifier: Arc<dyn ChatNotifier>,
    channel_id: String,
    runtime: Handle,
}

impl std::fmt::Debug for ChatHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatHandler")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("channel_id", &self.channel_id)
            .finish()
    }
}

impl ChatHandler {
    /// Create a chat handler. Must be called from within a tokio runtime.
    pub fn new(
        name: impl Into<String>,
        level: Level,
        formatter: Arc<Formatter>,
        notifier: Option<Arc<dyn ChatNotifier>>,
        channel_id: impl Into<String>,
    ) -> Result<Self, HandlerError> {
        let notifier = notifier.ok_or(HandlerError::MissingField {
            handler: "DiscordHandler",
            field: "server.bot_token",
        })?;
        let channel_id = channel_id.into();
        if channel_id.trim().is_empty() {
            return Err(HandlerError::MissingField {
                handler: "DiscordHandler",
                field: "channel_id",
            });
        }
        let runtime = Handle::try_current().map_err(|_| HandlerError::NoRuntime("DiscordHandler"))?;

        Ok(Self {
            name: name.into(),
            level,
            formatter,
            notifier,
            channel_id,
            runtime,
        })
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }
}

impl Handler for ChatHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> Level {
        self.level
    }

    fn emit(&self, record: &LogRecord) -> Result<(), HandlerError> {
        let content = self.formatter.render(record);
        let notifier = Arc::clone(&self.notifier);
        let channel_id = self.channel_id.clone();
        let handler = self.name.clone();

        self.runtime.spawn(async move {
            if let Err(e) = notifier.send_message(&channel_id, &content).await {
                warn!("Handler {} failed to deliver to channel {}: {}", handler, channel_id, e);
            }
        });
        Ok(())
    }
}
