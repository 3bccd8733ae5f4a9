//! Error types for the zpix plugin.
//!
//! This module defines the centralized error type [`ZpixError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for zpix plugin operations.
///
/// Provider failures of every kind (transport, HTTP status, malformed body) end
/// up in either [`ZpixError::Provider`] or [`ZpixError::Decode`]. The search
/// controller does not distinguish between them and reports a single
/// "request failed" notification for both.
///
/// # Examples
///
/// ```
/// use zpix::ZpixError;
///
/// fn validate_config() -> Result<(), ZpixError> {
///     Err(ZpixError::Config("api_key is not set".to_string()))
/// }
///
/// assert!(validate_config().is_err());
/// ```
#[derive(Debug, Error)]
pub enum ZpixError {
    /// The image search provider rejected the request or could not be reached.
    ///
    /// Carries the HTTP status or transport message reported by Zellij.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The provider answered with a body that is not the expected JSON shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when required configuration values (such as the provider API key)
    /// are missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for zpix operations.
///
/// This is a type alias for `std::result::Result<T, ZpixError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, ZpixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_errors_convert_with_question_mark() {
        fn parse(body: &str) -> Result<serde_json::Value> {
            Ok(serde_json::from_str(body)?)
        }

        let err = parse("{not json").unwrap_err();
        assert!(matches!(err, ZpixError::Decode(_)));
        assert!(err.to_string().starts_with("Decode error:"));
    }

    #[test]
    fn provider_error_message_includes_detail() {
        let err = ZpixError::Provider("HTTP 429".to_string());
        assert_eq!(err.to_string(), "Provider error: HTTP 429");
    }
}
