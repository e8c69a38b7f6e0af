//! Client error types.

use std::fmt;

use canvascal_providers::ProviderError;

/// Shown when the event source fails; the diagnostic goes to the log.
pub const FETCH_FAILED_TEXT: &str = "Failed to load calendar events. Please try again later.";

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// The event source failed.
    Fetch(ProviderError),
    /// No event has the requested ID.
    UnknownEvent(String),
    /// An explicit output name that is not a plain file name.
    InvalidOutput(String),
    /// The export was reported to the user and abandoned.
    Export,
    /// IO error.
    Io(std::io::Error),
    /// Action failed (open, copy, etc).
    Action(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Fetch(_) => write!(f, "{}", FETCH_FAILED_TEXT),
            Self::UnknownEvent(id) => write!(f, "no event with id {}", id),
            Self::InvalidOutput(name) => {
                write!(f, "output must be a plain file name, got {:?}", name)
            }
            Self::Export => write!(f, "export failed"),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Action(msg) => write!(f, "action failed: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fetch(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ProviderError> for ClientError {
    fn from(err: ProviderError) -> Self {
        Self::Fetch(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn fetch_failure_hides_details() {
        let err = ClientError::from(ProviderError::unavailable("connection refused"));
        assert_eq!(err.to_string(), FETCH_FAILED_TEXT);
        assert!(err.source().is_some());
    }

    #[test]
    fn unknown_event_names_id() {
        let err = ClientError::UnknownEvent("42".into());
        assert_eq!(err.to_string(), "no event with id 42");
    }
}
