//! Domain error types
//!
//! This module defines the error hierarchy for Shroud. All errors are
//! domain-specific and don't expose third-party types. The three boundary
//! failures (I/O, document parsing, PII config shape) are detected before any
//! core traversal begins; the traversals themselves only fail on the depth
//! guard.

use thiserror::Error;

/// Main Shroud error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum ShroudError {
    /// Application configuration errors (shroud.toml)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// File cannot be opened, read, or written
    #[error("I/O error: {0}")]
    Io(String),

    /// Input is not well-formed JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// PII config is not a flat string-to-string mapping
    #[error("PII config error: {0}")]
    PiiConfig(String),

    /// Classifier adapter errors
    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    /// Document nesting exceeds the configured traversal depth guard
    #[error("Document nesting exceeds the maximum depth of {max_depth}")]
    DepthLimitExceeded { max_depth: usize },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Classifier-specific errors
///
/// Errors that occur when calling the external PII classifier. These errors
/// don't expose the HTTP client's types.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Failed to reach the classifier endpoint
    #[error("Failed to connect to classifier endpoint: {0}")]
    ConnectionFailed(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// The model's response was not the expected JSON shape
    #[error("Invalid classifier response: {0}")]
    InvalidResponse(String),

    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for ShroudError {
    fn from(err: std::io::Error) -> Self {
        ShroudError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ShroudError {
    fn from(err: serde_json::Error) -> Self {
        ShroudError::Parse(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ShroudError {
    fn from(err: toml::de::Error) -> Self {
        ShroudError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shroud_error_display() {
        let err = ShroudError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_depth_limit_display() {
        let err = ShroudError::DepthLimitExceeded { max_depth: 128 };
        assert!(err.to_string().contains("128"));
    }

    #[test]
    fn test_classifier_error_conversion() {
        let classifier_err = ClassifierError::ConnectionFailed("Network error".to_string());
        let shroud_err: ShroudError = classifier_err.into();
        assert!(matches!(shroud_err, ShroudError::Classifier(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let shroud_err: ShroudError = io_err.into();
        assert!(matches!(shroud_err, ShroudError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let shroud_err: ShroudError = json_err.into();
        assert!(matches!(shroud_err, ShroudError::Parse(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let shroud_err: ShroudError = toml_err.into();
        assert!(matches!(shroud_err, ShroudError::Configuration(_)));
        assert!(shroud_err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_shroud_error_implements_std_error() {
        let err = ShroudError::Parse("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
