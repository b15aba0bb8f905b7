use tracing::{info, instrument};

use meli_auth::SiteId;

use crate::error::Result;

impl super::MeliRestClient {
    /// URL the seller is sent to in order to authorize the application.
    pub fn auth_url(&self, site: SiteId, redirect_uri: &str) -> Result<String> {
        Ok(self
            .oauth
            .authorization_url(&self.credentials, site, redirect_uri)?)
    }

    /// Trade the held refresh token for a new token pair.
    ///
    /// The held credentials change only if the exchange succeeds.
    #[instrument(skip(self))]
    pub async fn refresh_token(&mut self) -> Result<()> {
        let refreshed = self.oauth.refresh(&self.credentials).await?;
        self.credentials = refreshed;
        info!(user_id = ?self.credentials.user_id(), "Access token refreshed");
        Ok(())
    }

    /// Exchange an authorization code and hold the resulting tokens.
    ///
    /// The held credentials change only if the exchange succeeds.
    #[instrument(skip(self, code))]
    pub async fn set_credentials_from_code(&mut self, code: &str, redirect_uri: &str) -> Result<()> {
        let exchanged = self
            .oauth
            .exchange_code(&self.credentials, code, redirect_uri)
            .await?;
        self.credentials = exchanged;
        info!(user_id = ?self.credentials.user_id(), "Authorization code exchanged");
        Ok(())
    }
}
