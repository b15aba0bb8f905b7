use std::time::Duration;

use meli_api::client::ClientConfig;
use meli_api::rest::MeliRestClient;
use meli_api::Credentials;
use wiremock::MockServer;

pub const ACCESS_TOKEN: &str = "APP_USR-1234-access";
pub const REFRESH_TOKEN: &str = "TG-1234-refresh";
pub const SELLER_ID: u64 = 202593498;

/// Credentials of a seller that already went through the code flow.
pub fn seller_credentials() -> Credentials {
    Credentials::new("5503910054141466", "app-secret")
        .with_tokens(ACCESS_TOKEN, REFRESH_TOKEN)
        .with_user_id(SELLER_ID)
}

/// Client pointed at `server`, with a short settle delay.
pub fn client_for(server: &MockServer, credentials: Credentials) -> MeliRestClient {
    let config = ClientConfig::builder()
        .with_base_url(server.uri())
        .with_timeout(Duration::from_secs(5))
        .build();
    MeliRestClient::with_config(credentials, config)
        .expect("client construction")
        .with_settle_delay(Duration::from_millis(20))
}
