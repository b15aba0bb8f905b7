//! # meli-client
//!
//! Core HTTP infrastructure for the MercadoLibre REST API.
//!
//! This crate provides the foundation the higher-level crates build on:
//! - Route templates for every endpoint the client talks to
//! - JSON request building and execution over `reqwest`
//! - Decoding of remote error payloads, including the synthesized
//!   "remote inconsistency" error for failures without a diagnostic body
//! - Advisory per-resource write locks
//! - Redaction of credentials in logged URLs
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │            (meli-auth, meli-rest)                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Router                                │
//! │  - Route templates + positional ids + query parameters      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    MeliHttpClient                           │
//! │  - JSON requests, per-resource write locks                  │
//! │  - Remote error decoding                                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use meli_client::{ClientConfig, MeliHttpClient, Route};
//!
//! let http = MeliHttpClient::new(ClientConfig::default())?;
//! let url = http.router().route_to(Route::Items, &["MLA600190449"], &())?;
//! let item: serde_json::Value = http.send_json(http.get(url)).await?;
//! ```

mod client;
mod config;
mod error;
mod lock;
mod request;
mod response;
mod router;
pub mod security;

pub use client::MeliHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{
    Error, ErrorCause, ErrorKind, RemoteError, Result, REMOTE_INCONSISTENCY,
    REMOTE_INCONSISTENCY_MESSAGE,
};
pub use lock::ResourceLocks;
pub use request::{RequestBuilder, RequestMethod};
pub use response::{decode_error, Response, ResponseExt};
pub use router::{Route, Router};

/// Origin every route is resolved against unless overridden.
pub const API_ORIGIN: &str = "https://api.mercadolibre.com";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("meli-api/", env!("CARGO_PKG_VERSION"));
