//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error(
        "Config file is corrupted: {reason}. It has been renamed to {} and a new one will be created on next start",
        quarantined.display()
    )]
    Corrupted {
        path: PathBuf,
        quarantined: PathBuf,
        reason: String,
    },

    #[error(
        "Could not quarantine corrupted config file {}: {source}. Make sure the program has write access to that directory",
        path.display()
    )]
    Quarantine {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing config section: {0}")]
    MissingSection(String),

    #[error("No entry named '{name}' in section '{section}'")]
    MissingEntry { section: String, name: String },

    #[error("Missing required field '{field}' in {location}")]
    MissingField { location: String, field: String },

    #[error("Unknown {kind} type '{type_name}' in {location}")]
    UnknownType {
        kind: String,
        type_name: String,
        location: String,
    },

    #[error("Invalid value in {location}: {message}")]
    InvalidValue { location: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Build an `InvalidValue` error for a section entry.
    pub fn invalid(location: impl Into<String>, message: impl ToString) -> Self {
        ConfigError::InvalidValue {
            location: location.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupted_error_names_quarantine_path() {
        let err = ConfigError::Corrupted {
            path: PathBuf::from("config.json"),
            quarantined: PathBuf::from("config.json_corrupted"),
            reason: "expected value at line 1".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("config.json_corrupted"));
        assert!(display.contains("expected value"));
    }

    #[test]
    fn test_missing_field_error() {
        let err = ConfigError::MissingField {
            location: "handlers.Chat".to_string(),
            field: "channel_id".to_string(),
        };
        assert!(err.to_string().contains("channel_id"));
        assert!(err.to_string().contains("handlers.Chat"));
    }

    #[test]
    fn test_unknown_type_error() {
        let err = ConfigError::UnknownType {
            kind: "monitor".to_string(),
            type_name: "PingMonitor".to_string(),
            location: "monitors.m1".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("monitor"));
        assert!(display.contains("PingMonitor"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ConfigError::from(io_err);
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_all_error_variants_display() {
        let errors: Vec<ConfigError> = vec![
            ConfigError::NotFound("path".to_string()),
            ConfigError::MissingSection("loggers".to_string()),
            ConfigError::MissingEntry {
                section: "loggers".to_string(),
                name: "main".to_string(),
            },
            ConfigError::invalid("handlers.h", "bad"),
        ];

        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }
}
