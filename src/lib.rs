//! # meli-api
//!
//! A typed MercadoLibre API client library for Rust.
//!
//! ## Security
//!
//! - Secrets and tokens are redacted in Debug output
//! - Tracing skips credential parameters
//! - Logged URLs have their token query values masked
//!
//! ## Crates
//!
//! - **meli-client** - Core HTTP infrastructure: routes, requests, error decoding, write locks
//! - **meli-auth** - Credentials, sites and the OAuth 2.0 code and refresh flows
//! - **meli-rest** - Listings, variations, categories, predictor, scans, notifications
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use meli_api::{Credentials, MeliRestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = MeliRestClient::new(Credentials::from_env()?)?;
//!     client.refresh_token().await?;
//!
//!     for product in client.fetch_products().await? {
//!         println!("{:?} {:?}", product.id, product.title);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "auth")]
pub use meli_auth as auth;
#[cfg(feature = "client")]
pub use meli_client as client;
#[cfg(feature = "rest")]
pub use meli_rest as rest;

// Re-export commonly used types at the top level
#[cfg(feature = "auth")]
pub use meli_auth::{Credentials, OAuthClient, SiteId};
#[cfg(feature = "client")]
pub use meli_client::{ClientConfig, MeliHttpClient};
#[cfg(feature = "rest")]
pub use meli_rest::{MeliRestClient, Product, ProductId, Variant, VariantId};
