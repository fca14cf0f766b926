//! Monitor errors.

use thiserror::Error;

/// Monitor error types.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// `start` was called on a monitor that already ran.
    #[error("Monitor {0} was already started; build a new instance to monitor again")]
    AlreadyStarted(String),

    /// `stop` was called on a monitor that is not running.
    #[error("Monitor {0} is not running")]
    NotRunning(String),

    /// `start` was called outside of a tokio runtime.
    #[error("Monitor {0} must be started from within a tokio runtime")]
    NoRuntime(String),

    /// A probe could not be performed.
    #[error("Probe failed: {0}")]
    Probe(String),

    /// Failed to sample resource utilisation.
    #[error("Failed to sample {0}")]
    Sampling(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_errors_name_monitor() {
        assert!(MonitorError::AlreadyStarted("gw".into()).to_string().contains("gw"));
        assert!(MonitorError::NotRunning("gw".into()).to_string().contains("not running"));
    }

    #[test]
    fn test_invalid_config_display() {
        let err = MonitorError::InvalidConfig("warn_threshold must be within 0..=100".into());
        assert!(err.to_string().starts_with("Invalid configuration"));
    }
}
