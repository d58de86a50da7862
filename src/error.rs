//! Error handling module for kspackages
//!
//! Provides the crate-level error type using thiserror. Parser failures keep
//! their own detailed type and convert into [`PayloadError`] with `?`.

use thiserror::Error;

use crate::packages::ParseError;

/// Main error type for payload configuration
#[derive(Error, Debug)]
pub enum PayloadError {
    /// Malformed packages section text
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// A setter received a value outside its legal domain
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    /// No handler exists, or the configured handler kind is unknown
    #[error("Handler not set: {0}")]
    HandlerNotSet(String),

    /// IO errors (configuration files, input sections)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for payload operations
pub type Result<T> = std::result::Result<T, PayloadError>;

impl PayloadError {
    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a handler not set error
    pub fn handler_not_set(msg: impl Into<String>) -> Self {
        Self::HandlerNotSet(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packages::ParseErrorKind;

    #[test]
    fn test_error_display() {
        let err = PayloadError::invalid_value("Languages", "must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid value for Languages: must not be empty"
        );

        let err = PayloadError::handler_not_set("no handler is active");
        assert_eq!(err.to_string(), "Handler not set: no handler is active");
    }

    #[test]
    fn test_parse_error_conversion() {
        let parse_err = ParseError::new(3, ParseErrorKind::MissingEnd);
        let err: PayloadError = parse_err.into();
        assert!(matches!(err, PayloadError::Parse(_)));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PayloadError = io_err.into();
        assert!(matches!(err, PayloadError::Io(_)));
    }
}
