//! Named, leveled loggers.

#[cfg(test)]
#[path = "logger_tests.rs"]
mod tests;

use std::sync::Arc;

use tracing::warn;

use crate::handler::Handler;
use crate::level::Level;
use crate::record::LogRecord;

/// Routes records at or above its level to every attached handler, in
/// attachment order, then to its parent logger when propagation is on.
/// A propagated record reaches the parent's handlers whatever the parent's
/// own level; only handler levels filter it there.
///
/// A handler failure is reported on the process diagnostics and does not stop
/// delivery to the remaining handlers.
pub struct Logger {
    name: String,
    level: Level,
    handlers: Vec<Arc<dyn Handler>>,
    parent: Option<Arc<Logger>>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("handlers", &self.handler_names())
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .finish()
    }
}

impl Logger {
    /// Create a logger with no handlers.
    pub fn new(name: impl Into<String>, level: Level) -> Self {
        Self {
            name: name.into(),
            level,
            handlers: Vec::new(),
            parent: None,
        }
    }

    /// Attach a handler after the ones already attached.
    pub fn with_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Hand accepted records to `parent`'s handlers after local delivery.
    pub fn with_parent(mut self, parent: Arc<Logger>) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn parent(&self) -> Option<&Arc<Logger>> {
        self.parent.as_ref()
    }

    /// Names of the attached handlers, in attachment order.
    pub fn handler_names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    pub fn is_enabled_for(&self, level: Level) -> bool {
        level >= self.level
    }

    /// Log a message.
    pub fn log(&self, level: Level, message: impl Into<String>) {
        if !self.is_enabled_for(level) {
            return;
        }
        let record = LogRecord::new(self.name.clone(), level, message);
        self.dispatch(&record);
    }

    fn dispatch(&self, record: &LogRecord) {
        for handler in &self.handlers {
            if let Err(e) = handler.handle(record) {
                warn!(
                    "Handler {} of logger {} failed: {}",
                    handler.name(),
                    self.name,
                    e
                );
            }
        }
        if let Some(ref parent) = self.parent {
            parent.dispatch(record);
        }
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.log(Level::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    pub fn critical(&self, message: impl Into<String>) {
        self.log(Level::Critical, message);
    }
}
