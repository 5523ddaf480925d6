//! Error types for bw-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for bw-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message carried by every bucket validation failure.
///
/// The remote API cannot tell "does not exist" apart from "exists but is
/// owned by another account", so one message covers both.
pub const CONNECTION_VALIDATION_MESSAGE: &str =
    "The S3 access credentials are invalid or the bucket does not exist.";

/// Error types for bw-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Bucket could not be confirmed to exist under the current credentials
    #[error("{0}")]
    ConnectionValidation(String),

    /// Configuration or settings error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operation name not known to the alias table or the SDK
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Error reported by the storage SDK, message kept as-is
    #[error("Network error: {0}")]
    Network(String),

    /// Operation resolves but this wrapper does not dispatch it
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// The validation failure raised when a bucket check comes back negative
    pub fn connection_validation() -> Self {
        Error::ConnectionValidation(CONNECTION_VALIDATION_MESSAGE.to_string())
    }

    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::InvalidUrl(_) => 2, // UsageError
            Error::UnknownCommand(_) => 2,                // UsageError
            Error::Network(_) => 3,                       // NetworkError
            Error::ConnectionValidation(_) => 4,          // AuthError
            Error::UnsupportedFeature(_) => 7,            // UnsupportedFeature
            _ => 1,                                       // GeneralError
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(Error::Config("test".into()).exit_code(), 2);
        assert_eq!(Error::UnknownCommand("test".into()).exit_code(), 2);
        assert_eq!(Error::Network("test".into()).exit_code(), 3);
        assert_eq!(Error::connection_validation().exit_code(), 4);
        assert_eq!(Error::UnsupportedFeature("test".into()).exit_code(), 7);
        assert_eq!(Error::General("test".into()).exit_code(), 1);
    }

    #[test]
    fn test_error_display() {
        let err = Error::connection_validation();
        assert_eq!(err.to_string(), CONNECTION_VALIDATION_MESSAGE);

        let err = Error::UnknownCommand("FrobnicateBucket".into());
        assert_eq!(err.to_string(), "Unknown command: FrobnicateBucket");
    }
}
