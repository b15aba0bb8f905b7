//! Error types for meli-client.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result type alias for meli-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Code carried by the error synthesized when a failure status arrives
/// without any diagnostic content.
pub const REMOTE_INCONSISTENCY: &str = "remote_inconsistency";

/// Message carried by the synthesized remote inconsistency error.
pub const REMOTE_INCONSISTENCY_MESSAGE: &str =
    "the server reported a failure status but sent no error details";

/// Error type for meli-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// The decoded remote error, if the server rejected the request.
    pub fn remote(&self) -> Option<&RemoteError> {
        match &self.kind {
            ErrorKind::Remote(remote) => Some(remote),
            _ => None,
        }
    }

    /// Returns true if the server failed without explaining why.
    pub fn is_remote_inconsistency(&self) -> bool {
        self.remote().is_some_and(RemoteError::is_inconsistency)
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The API answered with a non-success status.
    #[error("{0}")]
    Remote(RemoteError),

    /// HTTP request failed below the API layer.
    #[error("HTTP error: {status} {message}")]
    Http { status: u16, message: String },

    /// Request timeout.
    #[error("Request timeout")]
    Timeout,

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// More identifiers were given than the route has placeholders.
    #[error("route {route} takes at most {expected} identifiers, got {given}")]
    RouteArity {
        route: &'static str,
        expected: usize,
        given: usize,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

/// Error payload returned by the API on non-success responses.
///
/// ```json
/// {"message": "Item not found", "error": "not_found", "status": 404, "cause": []}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteError {
    pub message: String,
    #[serde(rename = "error")]
    pub code: String,
    pub status: u16,
    #[serde(rename = "cause")]
    pub causes: Vec<ErrorCause>,
}

/// One structured cause inside a [`RemoteError`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorCause {
    pub code: String,
    pub message: String,
}

impl RemoteError {
    /// The error synthesized for a failure status with no diagnostic body.
    pub fn inconsistency(status: u16) -> Self {
        Self {
            message: REMOTE_INCONSISTENCY_MESSAGE.to_string(),
            code: REMOTE_INCONSISTENCY.to_string(),
            status,
            causes: Vec::new(),
        }
    }

    /// Returns true if this is the synthesized inconsistency error.
    pub fn is_inconsistency(&self) -> bool {
        self.code == REMOTE_INCONSISTENCY
    }

    /// Returns true if neither the message nor the code carry anything.
    pub fn is_blank(&self) -> bool {
        self.message.is_empty() && self.code.is_empty()
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.causes.is_empty() {
            return write!(f, "{}: {}", self.code, self.message);
        }
        for (i, cause) in self.causes.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", cause.code, cause.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for RemoteError {}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs carry the access token in their query string.
        let err = err.without_url();
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else if err.is_decode() {
            ErrorKind::Json(err.to_string())
        } else if let Some(status) = err.status() {
            ErrorKind::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ErrorKind::Other(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}
