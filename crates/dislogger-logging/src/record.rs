//! Log records.

use chrono::{DateTime, Local};

use crate::level::Level;

/// A single log event, built once per `Logger::log` call and shared by every
/// handler that receives it.
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Name of the logger the record was logged on.
    pub logger: String,
    pub level: Level,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

impl LogRecord {
    /// Create a record stamped with the current time.
    pub fn new(logger: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self {
            logger: logger.into(),
            level,
            message: message.into(),
            timestamp: Local::now(),
        }
    }

    /// Override the timestamp.
    pub fn at(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
