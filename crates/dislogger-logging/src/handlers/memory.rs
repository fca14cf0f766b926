//! In-memory handler.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::HandlerError;
use crate::formatter::Formatter;
use crate::handler::Handler;
use crate::level::Level;
use crate::record::LogRecord;

/// Keeps every accepted record, with its formatted text, in memory.
pub struct MemoryHandler {
    name: String,
    level: Level,
    formatter: Arc<Formatter>,
    entries: Mutex<Vec<(LogRecord, String)>>,
}

impl MemoryHandler {
    pub fn new(name: impl Into<String>, level: Level, formatter: Arc<Formatter>) -> Self {
        Self {
            name: name.into(),
            level,
            formatter,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Records received so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.entries.lock().iter().map(|(r, _)| r.clone()).collect()
    }

    /// Formatted lines received so far.
    pub fn lines(&self) -> Vec<String> {
        self.entries.lock().iter().map(|(_, l)| l.clone()).collect()
    }

    /// Levels of the records received so far.
    pub fn levels(&self) -> Vec<Level> {
        self.entries.lock().iter().map(|(r, _)| r.level).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Handler for MemoryHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> Level {
        self.level
    }

    fn emit(&self, record: &LogRecord) -> Result<(), HandlerError> {
        let line = self.formatter.render(record);
        self.entries.lock().push((record.clone(), line));
        Ok(())
    }
}
