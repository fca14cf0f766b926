//! # DisLogger Logging
//!
//! The logging fabric monitors report through.
//!
//! ## Pieces
//!
//! - [`Formatter`]: renders a [`LogRecord`] from a `%(field)s` pattern
//! - [`Handler`]: delivers a formatted record to one sink (console, file, chat channel, SMS)
//! - [`Logger`]: named, leveled fan-out to an ordered list of handlers

pub mod error;
pub mod formatter;
pub mod handler;
pub mod handlers;
pub mod level;
pub mod logger;
pub mod record;

pub use error::HandlerError;
pub use formatter::Formatter;
pub use handler::Handler;
pub use handlers::{
    ChatHandler, ChatNotifier, FileHandler, MemoryHandler, SmsHandler, SmsProvider, StreamHandler,
    StreamTarget, TwilioClient, REQUEST_TIMEOUT, http_client,
};
pub use level::Level;
pub use logger::Logger;
pub use record::LogRecord;
