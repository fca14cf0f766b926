//! Append-only file handler.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::HandlerError;
use crate::formatter::Formatter;
use crate::handler::Handler;
use crate::level::Level;
use crate::record::LogRecord;

/// Appends one formatted line per record to a file.
pub struct FileHandler {
    name: String,
    level: Level,
    formatter: Arc<Formatter>,
    path: PathBuf,
    file: Mutex<File>,
}

impl FileHandler {
    /// Open (or create) `path` for appending. Parent directories are created.
    pub fn new(
        name: impl Into<String>,
        level: Level,
        formatter: Arc<Formatter>,
        path: impl AsRef<Path>,
    ) -> Result<Self, HandlerError> {
        let path = path.as_ref().to_path_buf();
        if path.as_os_str().is_empty() {
            return Err(HandlerError::MissingField {
                handler: "FileHandler",
                field: "path",
            });
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            name: name.into(),
            level,
            formatter,
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Handler for FileHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> Level {
        self.level
    }

    fn emit(&self, record: &LogRecord) -> Result<(), HandlerError> {
        let line = self.formatter.render(record);
        let mut file = self.file.lock();
        writeln!(file, "{}", line)?;
        file.flush()?;
        Ok(())
    }
}
