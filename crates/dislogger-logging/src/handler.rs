//! Handler capability.

use crate::error::HandlerError;
use crate::level::Level;
use crate::record::LogRecord;

/// A sink that receives records from one or more loggers.
///
/// Implementations must tolerate concurrent `emit` calls from several monitor
/// tasks; sinks that are not inherently safe for that hold their own lock.
pub trait Handler: Send + Sync {
    /// Name the handler was registered under.
    fn name(&self) -> &str;

    /// Minimum level this handler accepts.
    fn level(&self) -> Level;

    /// Format and deliver a record.
    fn emit(&self, record: &LogRecord) -> Result<(), HandlerError>;

    /// Deliver the record if it passes the handler's own level filter.
    fn handle(&self, record: &LogRecord) -> Result<(), HandlerError> {
        if record.level < self.level() {
            return Ok(());
        }
        self.emit(record)
    }
}
