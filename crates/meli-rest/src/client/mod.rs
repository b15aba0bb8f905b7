//! MercadoLibre REST API client.
//!
//! This client wraps `MeliHttpClient` from `meli-client` together with the
//! application [`Credentials`] and provides typed methods for items,
//! variations, categories, the category predictor, item scans and
//! notifications.

use std::time::Duration;

use serde::Serialize;

use meli_auth::{Credentials, OAuthClient};
use meli_client::{ClientConfig, MeliHttpClient, Route};

use crate::error::Result;

mod auth;
mod categories;
mod items;
mod predictor;
mod scan;
mod variants;
mod webhooks;

pub use scan::{MULTIGET_LIMIT, SCAN_PAGE_LIMIT};

/// Pause between the close and delete writes of [`MeliRestClient::delete_product`].
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// MercadoLibre REST API client.
///
/// Provides typed methods for:
/// - Item create, read, update, close and delete
/// - Variation read and write
/// - Category attributes and title-based category prediction
/// - Scanning and batch-fetching the seller's items
/// - Resolving notifications to items
///
/// # Example
///
/// ```rust,ignore
/// use meli_rest::{MeliRestClient, ProductId};
/// use meli_auth::Credentials;
///
/// let mut client = MeliRestClient::new(Credentials::from_env()?)?;
/// client.refresh_token().await?;
///
/// let product = client.get_product(&ProductId::from("MLA600190449")).await?;
/// let all = client.fetch_products().await?;
/// ```
#[derive(Debug, Clone)]
pub struct MeliRestClient {
    http: MeliHttpClient,
    oauth: OAuthClient,
    credentials: Credentials,
    settle_delay: Duration,
}

impl MeliRestClient {
    /// Create a new REST client with default HTTP configuration.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a new REST client with custom HTTP configuration.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let http = MeliHttpClient::new(config)?;
        Ok(Self::from_http(http, credentials))
    }

    /// Create a REST client from an existing `MeliHttpClient`.
    pub fn from_http(http: MeliHttpClient, credentials: Credentials) -> Self {
        Self {
            oauth: OAuthClient::new(http.clone()),
            http,
            credentials,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    /// Replace the underlying `reqwest` executor.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = self.http.with_http_client(client);
        self.oauth = OAuthClient::new(self.http.clone());
        self
    }

    /// Set the pause between closing and deleting an item.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Get the underlying `MeliHttpClient`.
    pub fn http(&self) -> &MeliHttpClient {
        &self.http
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = credentials;
    }

    /// URL for `route`, with the access token appended when one is held.
    fn url_with_token<P: Serialize + ?Sized>(
        &self,
        route: Route,
        ids: &[&str],
        params: &P,
    ) -> Result<String> {
        let mut url = self.http.router().route_to(route, ids, params)?;
        if self.credentials.has_access_token() {
            append_token(&mut url, self.credentials.access_token());
        }
        Ok(url)
    }

    /// URL for `route` on a call that cannot be made anonymously.
    fn url_requiring_token<P: Serialize + ?Sized>(
        &self,
        route: Route,
        ids: &[&str],
        params: &P,
    ) -> Result<String> {
        let token = self.credentials.require_access_token()?;
        let mut url = self.http.router().route_to(route, ids, params)?;
        append_token(&mut url, token);
        Ok(url)
    }
}

fn append_token(url: &mut String, token: &str) {
    url.push(if url.contains('?') { '&' } else { '?' });
    url.push_str("access_token=");
    url.push_str(&urlencoding::encode(token));
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = MeliRestClient::new(Credentials::new("123", "s3cret")).unwrap();
        assert_eq!(client.http().router().origin(), "https://api.mercadolibre.com");
        assert_eq!(client.settle_delay, DEFAULT_SETTLE_DELAY);
        assert_eq!(client.credentials().application_id(), "123");
    }

    #[test]
    fn test_token_is_appended() {
        let client = MeliRestClient::new(test_support::credentials()).unwrap();

        let url = client.url_with_token(Route::Items, &["MLA1"], &()).unwrap();
        assert_eq!(
            url,
            "https://api.mercadolibre.com/items/MLA1?access_token=APP_USR-access"
        );

        let url = client
            .url_with_token(Route::Items, &[], &[("ids", "MLA1,MLA2")])
            .unwrap();
        assert_eq!(
            url,
            "https://api.mercadolibre.com/items?ids=MLA1%2CMLA2&access_token=APP_USR-access"
        );
    }

    #[test]
    fn test_anonymous_urls() {
        let client = MeliRestClient::new(Credentials::new("123", "s3cret")).unwrap();

        let url = client.url_with_token(Route::Items, &["MLA1"], &()).unwrap();
        assert_eq!(url, "https://api.mercadolibre.com/items/MLA1");

        let err = client
            .url_requiring_token(Route::Items, &["MLA1"], &())
            .unwrap_err();
        assert!(matches!(
            err.kind,
            crate::ErrorKind::Auth(meli_auth::ErrorKind::NilAccessToken)
        ));
    }
}
