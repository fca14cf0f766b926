//! Handler errors.

use thiserror::Error;

/// Errors raised while building or driving a handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A required constructor argument was not supplied.
    #[error("{handler} needs to have a {field}. Make sure to include it in the handler config")]
    MissingField {
        handler: &'static str,
        field: &'static str,
    },

    /// Handler was built outside of a tokio runtime.
    #[error("{0} must be created from within a tokio runtime")]
    NoRuntime(&'static str),

    /// Writing to the sink failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Delivering to a remote sink failed.
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// The HTTP client for a remote sink could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_names_handler_and_field() {
        let err = HandlerError::MissingField {
            handler: "DiscordHandler",
            field: "channel_id",
        };
        let display = err.to_string();
        assert!(display.contains("DiscordHandler"));
        assert!(display.contains("channel_id"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = HandlerError::from(io_err);
        assert!(err.to_string().contains("pipe closed"));
    }
}
