//! OAuth 2.0 flows.
//!
//! Both grants go to `POST /oauth/token` with their parameters in the query
//! string. A successful exchange returns a fresh [`Credentials`] value; the
//! caller decides when to swap it in.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use meli_client::{MeliHttpClient, RemoteError, Route};

use crate::credentials::Credentials;
use crate::error::{Error, ErrorKind, Result};
use crate::site::SiteId;

/// OAuth client for the MercadoLibre token endpoint.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: MeliHttpClient,
}

impl OAuthClient {
    /// Create a new OAuth client on top of an HTTP client.
    pub fn new(http: MeliHttpClient) -> Self {
        Self { http }
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &MeliHttpClient {
        &self.http
    }

    /// URL the user is sent to in order to authorize the application.
    pub fn authorization_url(
        &self,
        creds: &Credentials,
        site: SiteId,
        redirect_uri: &str,
    ) -> Result<String> {
        if creds.application_id().is_empty() {
            return Err(Error::new(ErrorKind::NilApplicationId));
        }

        Ok(format!(
            "https://{}/authorization?response_type=code&client_id={}&redirect_uri={}",
            site.auth_host(),
            urlencoding::encode(creds.application_id()),
            urlencoding::encode(redirect_uri),
        ))
    }

    /// Trade the refresh token for a new token pair.
    ///
    /// `creds` is left untouched; on success the returned value carries both
    /// new tokens.
    #[instrument(skip(self, creds), fields(client_id = %creds.application_id()))]
    pub async fn refresh(&self, creds: &Credentials) -> Result<Credentials> {
        creds.validate_client()?;

        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", creds.application_id()),
            ("client_secret", creds.secret()),
            ("refresh_token", creds.refresh_token()),
        ];

        let token = self.request_token(&params).await?;
        token.into_credentials(creds)
    }

    /// Exchange an authorization code for a token pair.
    ///
    /// The code is not logged.
    #[instrument(skip(self, creds, code), fields(client_id = %creds.application_id()))]
    pub async fn exchange_code(
        &self,
        creds: &Credentials,
        code: &str,
        redirect_uri: &str,
    ) -> Result<Credentials> {
        creds.validate_server()?;
        if code.is_empty() {
            return Err(Error::new(ErrorKind::InvalidInput(
                "authorization code is empty".to_string(),
            )));
        }

        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", creds.application_id()),
            ("client_secret", creds.secret()),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ];

        let token = self.request_token(&params).await?;
        token.into_credentials(creds)
    }

    async fn request_token(&self, params: &[(&str, &str)]) -> Result<TokenResponse> {
        let url = self.http.router().route_to(Route::OAuthToken, &[], params)?;
        let token: TokenResponse = self.http.send_json(self.http.post(url)).await?;
        debug!(user_id = ?token.user_id, expires_in = ?token.expires_in, "Token issued");
        Ok(token)
    }
}

/// Token payload returned by `POST /oauth/token`.
///
/// Both tokens are redacted in Debug output.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime of the access token in seconds.
    pub expires_in: Option<u64>,
    pub scope: String,
    pub user_id: Option<u64>,
    pub refresh_token: String,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .field("user_id", &self.user_id)
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

impl TokenResponse {
    /// Copy of `base` carrying this token pair.
    ///
    /// A payload without both tokens is a remote inconsistency.
    pub fn into_credentials(self, base: &Credentials) -> Result<Credentials> {
        if self.access_token.is_empty() || self.refresh_token.is_empty() {
            return Err(Error::new(ErrorKind::Remote(RemoteError::inconsistency(200))));
        }

        let mut creds = base.clone();
        creds.set_tokens(self.access_token, self.refresh_token);
        if self.user_id.is_some() {
            creds.set_user_id(self.user_id);
        }
        Ok(creds)
    }
}
