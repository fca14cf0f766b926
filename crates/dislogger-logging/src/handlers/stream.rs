//! Console handler.

use std::io::Write;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::HandlerError;
use crate::formatter::Formatter;
use crate::handler::Handler;
use crate::level::Level;
use crate::record::LogRecord;

/// Which standard stream a [`StreamHandler`] writes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamTarget {
    Stdout,
    #[default]
    Stderr,
}

/// Writes one formatted line per record to stdout or stderr.
pub struct StreamHandler {
    name: String,
    level: Level,
    formatter: Arc<Formatter>,
    target: StreamTarget,
}

impl StreamHandler {
    pub fn new(
        name: impl Into<String>,
        level: Level,
        formatter: Arc<Formatter>,
        target: StreamTarget,
    ) -> Self {
        Self {
            name: name.into(),
            level,
            formatter,
            target,
        }
    }

    pub fn target(&self) -> StreamTarget {
        self.target
    }
}

impl Handler for StreamHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> Level {
        self.level
    }

    fn emit(&self, record: &LogRecord) -> Result<(), HandlerError> {
        let line = self.formatter.render(record);
        // Locking the std handle keeps concurrent lines from interleaving.
        match self.target {
            StreamTarget::Stdout => writeln!(std::io::stdout().lock(), "{}", line)?,
            StreamTarget::Stderr => writeln!(std::io::stderr().lock(), "{}", line)?,
        }
        Ok(())
    }
}
