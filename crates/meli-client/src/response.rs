//! HTTP response handling and remote error decoding.

use serde::de::DeserializeOwned;

use crate::error::{Error, ErrorKind, RemoteError, Result};

/// Wrapper around HTTP response with additional functionality.
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status())
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get the response body as text.
    pub async fn text(self) -> Result<String> {
        self.inner.text().await.map_err(Into::into)
    }

    /// Deserialize the response body as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        self.inner.json().await.map_err(Into::into)
    }

    /// Get access to the inner reqwest::Response.
    pub fn into_inner(self) -> reqwest::Response {
        self.inner
    }
}

/// Extension trait for processing API responses.
pub trait ResponseExt {
    /// Turn a non-success response into a decoded [`RemoteError`].
    fn check_meli_error(self) -> impl std::future::Future<Output = Result<Response>> + Send;
}

impl ResponseExt for Response {
    async fn check_meli_error(self) -> Result<Response> {
        if self.is_success() {
            return Ok(self);
        }

        let status = self.status();
        let body = self.text().await?;
        Err(decode_error(status, &body))
    }
}

/// Decode the body of a non-success response.
///
/// An empty body, or an error object with neither `message` nor `error`,
/// yields the synthesized remote inconsistency error. A body that is not an
/// error object at all surfaces as [`ErrorKind::Json`].
pub fn decode_error(status: u16, body: &str) -> Error {
    if body.trim().is_empty() {
        return Error::new(ErrorKind::Remote(RemoteError::inconsistency(status)));
    }

    match serde_json::from_str::<RemoteError>(body) {
        Ok(remote) if remote.is_blank() => {
            Error::new(ErrorKind::Remote(RemoteError::inconsistency(status)))
        }
        Ok(mut remote) => {
            if remote.status == 0 {
                remote.status = status;
            }
            Error::new(ErrorKind::Remote(remote))
        }
        Err(err) => err.into(),
    }
}
