use std::fmt;

use thiserror::Error;

/// What went wrong below HTTP, as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Connect,
    Timeout,
    Request,
    Body,
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportErrorKind::Connect => "connect",
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Request => "request",
            TransportErrorKind::Body => "body",
            TransportErrorKind::Other => "other",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Transport session is already initialized")]
    AlreadyInitialized,

    #[error("Transport session is not initialized yet")]
    NotInitialized,

    #[error("No call has completed on this transport yet")]
    NoResult,

    #[error("Request failed ({kind}): {message}")]
    Transport {
        kind: TransportErrorKind,
        message: String,
    },

    #[error("Resource not found")]
    NotFound,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("No content")]
    NoContent,

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Invalid parameters: {0}")]
    Parameter(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid transport configuration: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    pub fn http(status: u16) -> Self {
        ApiError::Http {
            status,
            message: format!("Got HTTP status code {status}"),
        }
    }

    pub fn transport(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        ApiError::Transport {
            kind,
            message: message.into(),
        }
    }

    /// HTTP status that produced this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::Unauthorized => Some(401),
            ApiError::NoContent => Some(204),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn suggestion(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized => Some("Check the username and password of the active profile"),
            ApiError::NotFound => Some("Check that the resource key or id is correct"),
            ApiError::Transport { .. } => Some("Check your network connection and the base URL"),
            ApiError::Config(_) => Some("Check the CA bundle and cookie file paths"),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_carries_status_in_message() {
        let err = ApiError::http(500);
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "Got HTTP status code 500");
    }

    #[test]
    fn test_status_of_classified_errors() {
        assert_eq!(ApiError::NotFound.status(), Some(404));
        assert_eq!(ApiError::Unauthorized.status(), Some(401));
        assert_eq!(ApiError::NoContent.status(), Some(204));
        assert_eq!(ApiError::NotInitialized.status(), None);
        assert_eq!(ApiError::Parameter("x".into()).status(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(ApiError::NoContent.to_string(), "No content");
        let err = ApiError::transport(TransportErrorKind::Connect, "connection refused");
        assert_eq!(err.to_string(), "Request failed (connect): connection refused");
    }

    #[test]
    fn test_suggestion() {
        assert!(ApiError::Unauthorized.suggestion().is_some());
        assert!(ApiError::AlreadyInitialized.suggestion().is_none());
    }
}
