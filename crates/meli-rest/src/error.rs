//! Error types for meli-rest.

use meli_client::RemoteError;

/// Result type alias for meli-rest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for meli-rest operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// The decoded remote error, if the API rejected the request.
    pub fn remote(&self) -> Option<&RemoteError> {
        match &self.kind {
            ErrorKind::Remote(remote) => Some(remote),
            _ => None,
        }
    }

    /// Returns true if the API failed without saying why.
    pub fn is_remote_inconsistency(&self) -> bool {
        self.remote().is_some_and(RemoteError::is_inconsistency)
    }

    /// Returns true for errors raised locally before any request was sent.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self.kind,
            ErrorKind::Remote(_)
                | ErrorKind::Client(_)
                | ErrorKind::Json(_)
                | ErrorKind::Auth(
                    meli_auth::ErrorKind::Http(_)
                        | meli_auth::ErrorKind::Json(_)
                        | meli_auth::ErrorKind::Remote(_)
                )
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    // Product validation
    #[error("the product id is not set")]
    NilProductId,
    #[error("the product title is not set")]
    NilTitle,
    #[error("the product price is not set")]
    NilPrice,
    #[error("the product stock is not set")]
    NilStock,
    #[error("the product category id is not set")]
    NilCategoryId,
    #[error("the category id {0:?} is invalid")]
    InvalidCategoryId(String),
    #[error("the product has no pictures")]
    NilPictures,
    #[error("the product condition is invalid")]
    InvalidCondition,
    #[error("the product buying mode is invalid")]
    InvalidBuyingMode,
    #[error("the listing type is invalid for the product's site")]
    InvalidListingType,

    // Variant validation
    #[error("the variant price is not set")]
    NilVariantPrice,
    #[error("the variant stock is not set")]
    NilVariantStock,
    #[error("the variant has no attribute combinations")]
    NilCombinations,
    #[error("the variant has no picture ids")]
    NilVariantPictures,
    #[error("the variant is incompatible with an existing variant")]
    IncompatibleVariant,

    #[error("invalid quantity of elements for a multiget request: {given} (max {max})")]
    InvalidMultigetQuantity { given: usize, max: usize },
    #[error("the resource {0:?} does not reference an item")]
    InvalidResource(String),

    #[error("Auth error: {0}")]
    Auth(meli_auth::ErrorKind),
    #[error("{0}")]
    Remote(RemoteError),
    #[error("Client error: {0}")]
    Client(String),
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<meli_client::Error> for Error {
    fn from(err: meli_client::Error) -> Self {
        let kind = match &err.kind {
            meli_client::ErrorKind::Remote(remote) => ErrorKind::Remote(remote.clone()),
            meli_client::ErrorKind::Json(message) => ErrorKind::Json(message.clone()),
            other => ErrorKind::Client(other.to_string()),
        };
        Error {
            kind,
            source: Some(Box::new(err)),
        }
    }
}

impl From<meli_auth::Error> for Error {
    fn from(err: meli_auth::Error) -> Self {
        let kind = match &err.kind {
            meli_auth::ErrorKind::Remote(remote) => ErrorKind::Remote(remote.clone()),
            other => ErrorKind::Auth(other.clone()),
        };
        Error {
            kind,
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Json(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}
