//! Error types for event source operations.
//!
//! A failed fetch is terminal for the invocation that triggered it; the codes
//! below classify the failure for logging and for the client's exit status.

use std::fmt;
use thiserror::Error;

/// The category of a provider error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// The source could not be reached.
    Unavailable,
    /// The source answered with data that could not be understood.
    InvalidResponse,
    /// The source data does not exist (missing file, unknown feed).
    NotFound,
    /// Configuration error - missing or invalid config.
    ConfigurationError,
    /// Internal provider error - unexpected state, bug.
    InternalError,
}

impl ProviderErrorCode {
    /// Returns a machine-friendly name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unavailable => "unavailable",
            Self::InvalidResponse => "invalid_response",
            Self::NotFound => "not_found",
            Self::ConfigurationError => "configuration_error",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while fetching events from a source.
#[derive(Debug, Error)]
pub struct ProviderError {
    code: ProviderErrorCode,
    message: String,
    /// The source that generated this error (e.g. "mock", "file").
    provider: Option<String>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    /// Creates a new provider error with the given code and message.
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider: None,
            source: None,
        }
    }

    /// Creates an unavailable-source error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::Unavailable, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidResponse, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ConfigurationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InternalError, message)
    }

    /// Classifies an I/O error raised while reading source data.
    pub fn from_io(err: std::io::Error, context: impl Into<String>) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ProviderErrorCode::NotFound,
            _ => ProviderErrorCode::Unavailable,
        };
        Self::new(code, context).with_source(err)
    }

    /// Sets the provider name for this error.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the provider name, if set.
    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref provider) = self.provider {
            write!(f, "[{}] ", provider)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_display() {
        assert_eq!(ProviderErrorCode::Unavailable.as_str(), "unavailable");
        assert_eq!(
            ProviderErrorCode::InvalidResponse.to_string(),
            "invalid_response"
        );
    }

    #[test]
    fn provider_error_creation() {
        let err = ProviderError::new(ProviderErrorCode::NotFound, "events.json");
        assert_eq!(err.code(), ProviderErrorCode::NotFound);
        assert_eq!(err.message(), "events.json");
        assert!(err.provider().is_none());
    }

    #[test]
    fn provider_error_display() {
        let err = ProviderError::invalid_response("bad JSON").with_provider("file");
        let display = format!("{}", err);
        assert!(display.contains("[file]"));
        assert!(display.contains("invalid_response"));
        assert!(display.contains("bad JSON"));
    }

    #[test]
    fn io_errors_are_classified() {
        use std::error::Error;
        use std::io;

        let missing = ProviderError::from_io(io::Error::from(io::ErrorKind::NotFound), "gone");
        assert_eq!(missing.code(), ProviderErrorCode::NotFound);
        assert!(missing.source().is_some());

        let denied = ProviderError::from_io(
            io::Error::from(io::ErrorKind::PermissionDenied),
            "no access",
        );
        assert_eq!(denied.code(), ProviderErrorCode::Unavailable);
    }
}
