//! # meli-auth
//!
//! Authentication for the MercadoLibre API.
//!
//! ## Security
//!
//! - Secrets and tokens are redacted in Debug output
//! - Tracing spans skip credential arguments
//! - Token exchanges hand back a new [`Credentials`] value and never touch the
//!   caller's copy, so a failed exchange cannot leave half-updated tokens
//!
//! ## Supported flows
//!
//! - **Authorization code** - build the per-site authorization URL, then
//!   exchange the returned code for tokens
//! - **Refresh token** - trade the refresh token for a new token pair
//!
//! ## Example
//!
//! ```rust,ignore
//! use meli_auth::{Credentials, OAuthClient, SiteId};
//! use meli_client::MeliHttpClient;
//!
//! let creds = Credentials::from_env()?;
//! let oauth = OAuthClient::new(MeliHttpClient::default_client()?);
//!
//! let url = oauth.authorization_url(&creds, SiteId::Mla, "https://example.com/cb")?;
//! // ... user authorizes, the redirect carries `code` ...
//! let creds = oauth.exchange_code(&creds, "TG-code", "https://example.com/cb").await?;
//! let creds = oauth.refresh(&creds).await?;
//! ```

mod credentials;
mod error;
mod oauth;
mod site;

pub use credentials::Credentials;
pub use error::{Error, ErrorKind, Result};
pub use oauth::{OAuthClient, TokenResponse};
pub use site::SiteId;
