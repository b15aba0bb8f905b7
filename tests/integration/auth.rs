use meli_api::rest::ErrorKind;
use meli_api::{Credentials, SiteId};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{client_for, seller_credentials, ACCESS_TOKEN, REFRESH_TOKEN};

#[tokio::test]
async fn test_code_then_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(query_param("grant_type", "authorization_code"))
        .and(query_param("code", "TG-code-from-redirect"))
        .and(query_param("redirect_uri", "https://seller.example.com/callback"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "APP_USR-first",
            "token_type": "bearer",
            "expires_in": 21600,
            "scope": "offline_access read write",
            "user_id": 202593498,
            "refresh_token": "TG-first"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(query_param("grant_type", "refresh_token"))
        .and(query_param("refresh_token", "TG-first"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "APP_USR-second",
            "refresh_token": "TG-second"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server, Credentials::new("5503910054141466", "app-secret"));

    let url = client
        .auth_url(SiteId::Mla, "https://seller.example.com/callback")
        .unwrap();
    assert!(url.starts_with("https://auth.mercadolibre.com.ar/authorization?"));

    client
        .set_credentials_from_code("TG-code-from-redirect", "https://seller.example.com/callback")
        .await
        .unwrap();
    assert_eq!(client.credentials().access_token(), "APP_USR-first");
    assert_eq!(client.credentials().user_id(), Some(202593498));

    client.refresh_token().await.unwrap();
    assert_eq!(client.credentials().access_token(), "APP_USR-second");
    assert_eq!(client.credentials().refresh_token(), "TG-second");
    assert_eq!(client.credentials().user_id(), Some(202593498));
}

#[tokio::test]
async fn test_refresh_failure_keeps_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token_type": "bearer"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server, seller_credentials());
    let err = client.refresh_token().await.unwrap_err();

    assert!(err.is_remote_inconsistency());
    assert!(matches!(err.kind, ErrorKind::Remote(_)));
    assert_eq!(client.credentials().access_token(), ACCESS_TOKEN);
    assert_eq!(client.credentials().refresh_token(), REFRESH_TOKEN);
}

#[tokio::test]
async fn test_code_failure_keeps_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(query_param("code", "TG-expired"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Error validating grant",
            "error": "invalid_grant",
            "status": 400,
            "cause": []
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(query_param("code", "TG-tokenless"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"scope": "read"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server, seller_credentials());

    let err = client
        .set_credentials_from_code("TG-expired", "https://seller.example.com/callback")
        .await
        .unwrap_err();
    assert_eq!(err.remote().unwrap().status, 400);
    assert_eq!(client.credentials(), &seller_credentials());

    let err = client
        .set_credentials_from_code("TG-tokenless", "https://seller.example.com/callback")
        .await
        .unwrap_err();
    assert!(err.is_remote_inconsistency());
    assert_eq!(client.credentials(), &seller_credentials());
}
