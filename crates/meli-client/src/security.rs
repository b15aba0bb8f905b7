//! Security utilities shared by the MercadoLibre crates.
//!
//! ## Credential redaction
//!
//! The API takes the access token as a query parameter, so every request
//! URL is a secret. URLs MUST go through [`url::redact`] before they reach a
//! log line or an error message.
//!
//! ```rust
//! use meli_client::security::url;
//!
//! let logged = url::redact("https://api.mercadolibre.com/items/MLA1?access_token=APP_USR-1");
//! assert!(!logged.contains("APP_USR-1"));
//! ```

/// URL helpers.
pub mod url {
    /// Placeholder written in place of a sensitive value.
    pub const REDACTED: &str = "[REDACTED]";

    /// Query parameters whose values are credentials.
    pub const SENSITIVE_PARAMS: &[&str] =
        &["access_token", "refresh_token", "client_secret", "code"];

    /// Returns true if the query parameter carries a credential.
    pub fn is_sensitive(name: &str) -> bool {
        SENSITIVE_PARAMS.contains(&name)
    }

    /// Mask the values of sensitive query parameters.
    ///
    /// A string that does not parse as a URL loses its whole query string.
    #[must_use]
    pub fn redact(raw: &str) -> String {
        let Ok(mut parsed) = ::url::Url::parse(raw) else {
            return raw.split('?').next().unwrap_or_default().to_string();
        };

        if !parsed.query_pairs().any(|(name, _)| is_sensitive(&name)) {
            return parsed.into();
        }

        let pairs: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(name, value)| {
                let value = if is_sensitive(&name) {
                    REDACTED.to_string()
                } else {
                    value.into_owned()
                };
                (name.into_owned(), value)
            })
            .collect();

        parsed.query_pairs_mut().clear().extend_pairs(pairs);
        parsed.into()
    }
}
