//! Application and user credentials.

use crate::error::{Error, ErrorKind, Result};

/// Credentials of a MercadoLibre application and, optionally, the user it
/// acts for.
///
/// "Server" operations only need the application id and secret; "client"
/// operations also need the user's token pair. Persisting them is the
/// caller's job.
///
/// The secret and both tokens are redacted in Debug output.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    application_id: String,
    secret: String,
    access_token: String,
    refresh_token: String,
    user_id: Option<u64>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |value: &str| if value.is_empty() { "" } else { "[REDACTED]" };
        f.debug_struct("Credentials")
            .field("application_id", &self.application_id)
            .field("secret", &redact(&self.secret))
            .field("access_token", &redact(&self.access_token))
            .field("refresh_token", &redact(&self.refresh_token))
            .field("user_id", &self.user_id)
            .finish()
    }
}

impl Credentials {
    /// Create application credentials without user tokens.
    pub fn new(application_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            secret: secret.into(),
            ..Self::default()
        }
    }

    /// Attach a user token pair.
    pub fn with_tokens(
        mut self,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        self.set_tokens(access_token, refresh_token);
        self
    }

    /// Attach the id of the user the tokens belong to.
    pub fn with_user_id(mut self, user_id: u64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Load credentials from environment variables.
    ///
    /// `MELI_APP_ID` and `MELI_SECRET` are required; `MELI_ACCESS_TOKEN`,
    /// `MELI_REFRESH_TOKEN` and `MELI_USER_ID` are picked up when set.
    pub fn from_env() -> Result<Self> {
        let application_id = std::env::var("MELI_APP_ID")
            .map_err(|_| Error::new(ErrorKind::EnvVar("MELI_APP_ID".to_string())))?;
        let secret = std::env::var("MELI_SECRET")
            .map_err(|_| Error::new(ErrorKind::EnvVar("MELI_SECRET".to_string())))?;

        let access_token = std::env::var("MELI_ACCESS_TOKEN").unwrap_or_default();
        let refresh_token = std::env::var("MELI_REFRESH_TOKEN").unwrap_or_default();

        let mut creds =
            Self::new(application_id, secret).with_tokens(access_token, refresh_token);

        if let Ok(raw) = std::env::var("MELI_USER_ID") {
            let user_id = raw.parse().map_err(|_| {
                Error::new(ErrorKind::InvalidInput(
                    "MELI_USER_ID must be a numeric user id".to_string(),
                ))
            })?;
            creds.user_id = Some(user_id);
        }

        Ok(creds)
    }

    /// The application (client) id.
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }

    /// The current access token, empty if unset.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// The current refresh token, empty if unset.
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// Id of the user the tokens belong to, when known.
    pub fn user_id(&self) -> Option<u64> {
        self.user_id
    }

    /// Returns true if an access token is present.
    pub fn has_access_token(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// Replace both tokens.
    pub fn set_tokens(
        &mut self,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) {
        self.access_token = access_token.into();
        self.refresh_token = refresh_token.into();
    }

    /// Set the id of the user the tokens belong to.
    pub fn set_user_id(&mut self, user_id: Option<u64>) {
        self.user_id = user_id;
    }

    /// Check the fields required by application-only operations.
    pub fn validate_server(&self) -> Result<()> {
        if self.application_id.is_empty() {
            return Err(Error::new(ErrorKind::NilApplicationId));
        }
        if self.secret.is_empty() {
            return Err(Error::new(ErrorKind::NilSecret));
        }
        Ok(())
    }

    /// Check the fields required by operations on behalf of a user.
    ///
    /// Server-level checks run first.
    pub fn validate_client(&self) -> Result<()> {
        self.validate_server()?;
        if self.refresh_token.is_empty() {
            return Err(Error::new(ErrorKind::NilRefreshToken));
        }
        if self.access_token.is_empty() {
            return Err(Error::new(ErrorKind::NilAccessToken));
        }
        Ok(())
    }

    /// The access token, or [`ErrorKind::NilAccessToken`] if unset.
    pub fn require_access_token(&self) -> Result<&str> {
        if self.access_token.is_empty() {
            return Err(Error::new(ErrorKind::NilAccessToken));
        }
        Ok(&self.access_token)
    }
}
