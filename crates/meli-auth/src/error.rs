//! Error types for meli-auth.
//!
//! Error messages never include credential values.

use meli_client::RemoteError;

/// Result type alias for meli-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for meli-auth operations.
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

    /// The decoded remote error, if the token endpoint rejected the request.
    pub fn remote(&self) -> Option<&RemoteError> {
        match &self.kind {
            ErrorKind::Remote(remote) => Some(remote),
            _ => None,
        }
    }

    /// Returns true if the server answered without a usable payload.
    pub fn is_remote_inconsistency(&self) -> bool {
        self.remote().is_some_and(RemoteError::is_inconsistency)
    }
}

/// The kind of error that occurred.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ErrorKind {
    #[error("the application id is not set")]
    NilApplicationId,

    #[error("the application secret is not set")]
    NilSecret,

    #[error("the access token is not set")]
    NilAccessToken,

    #[error("the refresh token is not set")]
    NilRefreshToken,

    /// Site code outside the supported table.
    #[error("the site id {0:?} is not a supported site")]
    InvalidSiteId(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Environment variable not set.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),

    /// The token endpoint answered with an error payload.
    #[error("{0}")]
    Remote(RemoteError),

    /// HTTP error during authentication.
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<meli_client::Error> for Error {
    fn from(err: meli_client::Error) -> Self {
        let kind = match &err.kind {
            meli_client::ErrorKind::Remote(remote) => ErrorKind::Remote(remote.clone()),
            meli_client::ErrorKind::Json(message) => ErrorKind::Json(message.clone()),
            other => ErrorKind::Http(other.to_string()),
        };
        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}
