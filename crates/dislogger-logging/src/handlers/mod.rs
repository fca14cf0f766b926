//! Built-in handler variants.

mod chat;
mod file;
mod memory;
mod sms;
mod stream;

pub use chat::{ChatHandler, ChatNotifier};
pub use file::FileHandler;
pub use memory::MemoryHandler;
pub use sms::{DEFAULT_FROM_NUMBER, SmsHandler, SmsProvider, TwilioClient};
pub use stream::{StreamHandler, StreamTarget};

use std::time::Duration;

use crate::error::HandlerError;

/// Upper bound on one request to a remote sink.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for remote sinks. Every request gives up after `timeout`.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, HandlerError> {
    Ok(reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()?)
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
