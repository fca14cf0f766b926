//! Status notifications for the operator.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use dislogger_logging::{ChatNotifier, REQUEST_TIMEOUT};

/// Receives the short progress messages of the supervisor.
#[async_trait]
pub trait StatusReporter: Send + Sync {
    async fn report(&self, message: &str);
}

/// Reports to the process log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

#[async_trait]
impl StatusReporter for LogReporter {
    async fn report(&self, message: &str) {
        info!("{}", message);
    }
}

/// Reports to a chat channel. Delivery failures and posts that outlast the
/// timeout are logged and dropped.
pub struct ChatReporter {
    notifier: Arc<dyn ChatNotifier>,
    channel_id: String,
    timeout: Duration,
}

impl ChatReporter {
    pub fn new(notifier: Arc<dyn ChatNotifier>, channel_id: impl Into<String>) -> Self {
        Self {
            notifier,
            channel_id: channel_id.into(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl StatusReporter for ChatReporter {
    async fn report(&self, message: &str) {
        info!("{}", message);
        let send = self.notifier.send_message(&self.channel_id, message);
        match tokio::time::timeout(self.timeout, send).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Could not post status to channel {}: {}", self.channel_id, e),
            Err(_) => warn!(
                "Status post to channel {} timed out after {:?}",
                self.channel_id, self.timeout
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use dislogger_logging::HandlerError;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl ChatNotifier for Recorder {
        async fn send_message(&self, channel_id: &str, content: &str) -> Result<(), HandlerError> {
            if self.fail {
                return Err(HandlerError::Delivery("Unknown Channel".to_string()));
            }
            self.sent.lock().push((channel_id.to_string(), content.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_chat_reporter_posts_to_channel() {
        let recorder = Arc::new(Recorder::default());
        let reporter = ChatReporter::new(recorder.clone(), "42");

        reporter.report(":up: gateway started monitoring.").await;

        assert_eq!(
            recorder.sent.lock().clone(),
            vec![("42".to_string(), ":up: gateway started monitoring.".to_string())]
        );
    }

    #[tokio::test]
    async fn test_chat_reporter_swallows_failures() {
        let recorder = Arc::new(Recorder {
            fail: true,
            ..Default::default()
        });
        ChatReporter::new(recorder.clone(), "42").report("hello").await;
        assert!(recorder.sent.lock().is_empty());
    }

    struct StalledNotifier;

    #[async_trait]
    impl ChatNotifier for StalledNotifier {
        async fn send_message(&self, _channel_id: &str, _content: &str) -> Result<(), HandlerError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_reporter_gives_up_on_stalled_post() {
        let reporter = ChatReporter::new(Arc::new(StalledNotifier), "42");
        let started = tokio::time::Instant::now();

        reporter.report(":white_check_mark: Done.").await;

        assert!(started.elapsed() >= REQUEST_TIMEOUT);
        assert!(started.elapsed() < REQUEST_TIMEOUT + Duration::from_secs(1));
    }
}
