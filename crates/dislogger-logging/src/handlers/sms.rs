//! SMS handler.
//!
//! One message is sent per accepted record. There is no batching, retry or
//! rate limiting on this path.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::error::HandlerError;
use crate::formatter::Formatter;
use crate::handler::Handler;
use crate::level::Level;
use crate::record::LogRecord;

const PHONE_PREFIX: &str = "+";

/// Sender used when `twilio.from_number` is left empty.
pub const DEFAULT_FROM_NUMBER: &str = "+18737001763";

/// Send primitive of an SMS provider.
#[async_trait]
pub trait SmsProvider: Send + Sync {
    /// Send `body` to the number `to`.
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), HandlerError>;
}

/// Twilio REST client.
pub struct TwilioClient {
    account_sid: String,
    auth_token: String,
    from_number: String,
    client: reqwest::Client,
}

impl TwilioClient {
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from_number: impl Into<String>,
    ) -> Result<Self, HandlerError> {
        let account_sid = account_sid.into();
        let auth_token = auth_token.into();
        let from_number: String = from_number.into();
        let from_number = match from_number.trim() {
            "" => DEFAULT_FROM_NUMBER.to_string(),
            number => number.to_string(),
        };
        if account_sid.is_empty() {
            return Err(HandlerError::MissingField {
                handler: "SMSHandler",
                field: "twilio.sid",
            });
        }
        if auth_token.is_empty() {
            return Err(HandlerError::MissingField {
                handler: "SMSHandler",
                field: "twilio.secret",
            });
        }
        Ok(Self {
            account_sid,
            auth_token,
            from_number,
            client: super::http_client(super::REQUEST_TIMEOUT)?,
        })
    }

    /// Number the messages are sent from.
    pub fn from_number(&self) -> &str {
        &self.from_number
    }
}

#[async_trait]
impl SmsProvider for TwilioClient {
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), HandlerError> {
        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.account_sid
        );

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to), ("From", self.from_number.as_str()), ("Body", body)])
            .send()
            .await
            .map_err(|e| HandlerError::Delivery(format!("Twilio request failed: {}", e)))?;

        if response.status().is_success() {
            debug!("SMS sent to {}", to);
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(HandlerError::Delivery(format!(
                "Twilio API returned {}: {}",
                status, body
            )))
        }
    }
}

/// Sends each accepted record as a text message.
pub struct SmsHandler {
    name: String,
    level: Level,
    formatter: Arc<Formatter>,
    provider: Arc<dyn SmsProvider>,
    destination: String,
    runtime: Handle,
}

impl SmsHandler {
    /// Create an SMS handler. Must be called from within a tokio runtime.
    pub fn new(
        name: impl Into<String>,
        level: Level,
        formatter: Arc<Formatter>,
        provider: Arc<dyn SmsProvider>,
        destination: impl Into<String>,
    ) -> Result<Self, HandlerError> {
        let destination = destination.into();
        let digits = destination.trim().trim_start_matches(PHONE_PREFIX);
        if digits.is_empty() {
            return Err(HandlerError::MissingField {
                handler: "SMSHandler",
                field: "phone_number_destination",
            });
        }
        let runtime = Handle::try_current().map_err(|_| HandlerError::NoRuntime("SMSHandler"))?;

        Ok(Self {
            name: name.into(),
            level,
            formatter,
            provider,
            destination: format!("{}{}", PHONE_PREFIX, digits),
            runtime,
        })
    }

    /// Destination number including the `+` prefix.
    pub fn destination(&self) -> &str {
        &self.destination
    }
}

impl Handler for SmsHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> Level {
        self.level
    }

    fn emit(&self, record: &LogRecord) -> Result<(), HandlerError> {
        let body = self.formatter.render(record);
        let provider = Arc::clone(&self.provider);
        let to = self.destination.clone();
        let handler = self.name.clone();

        self.runtime.spawn(async move {
            if let Err(e) = provider.send_sms(&to, &body).await {
                warn!("Handler {} failed to send SMS to {}: {}", handler, to, e);
            }
        });
        Ok(())
    }
}
