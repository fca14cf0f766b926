//! Core errors.

use thiserror::Error;

use dislogger_config::ConfigError;
use dislogger_logging::HandlerError;
use dislogger_monitor::MonitorError;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The configuration could not be resolved into live objects.
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Monitors are already running")]
    AlreadyLogging,

    #[error("Monitors are not running")]
    NotLogging,

    #[error("Monitor {name} failed: {source}")]
    Monitor {
        name: String,
        #[source]
        source: MonitorError,
    },

    /// A delivery channel outside the document could not be set up.
    #[error("Delivery setup failed: {0}")]
    Delivery(#[from] HandlerError),
}

impl CoreError {
    /// Configuration problems end the process; everything else is reported
    /// to the operator.
    pub fn is_config(&self) -> bool {
        matches!(self, CoreError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_transparent() {
        let err = CoreError::from(ConfigError::MissingSection("monitors".to_string()));
        assert!(err.is_config());
        assert_eq!(err.to_string(), "Missing config section: monitors");
    }

    #[test]
    fn test_monitor_error_names_monitor() {
        let err = CoreError::Monitor {
            name: "gateway".to_string(),
            source: MonitorError::NoRuntime("gateway".to_string()),
        };
        assert!(!err.is_config());
        assert!(err.to_string().starts_with("Monitor gateway failed"));
        assert!(!CoreError::AlreadyLogging.is_config());
    }
}
