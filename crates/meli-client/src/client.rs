//! Core HTTP client for the MercadoLibre API.

use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::lock::ResourceLocks;
use crate::request::{RequestBuilder, RequestMethod};
use crate::response::{Response, ResponseExt};
use crate::router::Router;
use crate::security::url::redact;

/// HTTP client for the MercadoLibre API.
///
/// Clones share the underlying connection pool and the write lock table.
#[derive(Debug, Clone)]
pub struct MeliHttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
    router: Router,
    locks: ResourceLocks,
}

impl MeliHttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self {
            inner,
            router: Router::new(&config.base_url),
            config,
            locks: ResourceLocks::new(),
        })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Replace the underlying executor, e.g. with one set up for a test double.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.inner = client;
        self
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Router bound to the configured origin.
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Create a GET request builder.
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Get, url)
    }

    /// Create a POST request builder.
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Post, url)
    }

    /// Create a PUT request builder.
    pub fn put(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Put, url)
    }

    /// Execute a request and return the raw response, whatever its status.
    ///
    /// Writes hold the lock of their resource family for the duration of
    /// the request.
    #[instrument(skip(self, request), fields(method = ?request.method, url = %redact(&request.url)))]
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let _guard = match self.write_family(&request) {
            Some(family) => Some(self.locks.acquire(&family).await),
            None => None,
        };

        self.execute_once(&request).await
    }

    /// Lock family of a write, taken from the path below the configured origin.
    fn write_family(&self, request: &RequestBuilder) -> Option<String> {
        if !self.config.serialize_writes || !request.method.is_write() {
            return None;
        }
        self.router
            .strip_origin(&request.url)
            .and_then(ResourceLocks::family_of)
    }

    async fn execute_once(&self, request: &RequestBuilder) -> Result<Response> {
        let mut req = self
            .inner
            .request(request.method.to_reqwest(), &request.url)
            .header("Accept", "application/json");

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(ref body) = request.body {
            req = req.json(body);
        }

        if self.config.enable_tracing {
            debug!(method = ?request.method, url = %redact(&request.url), "Sending request");
        }

        let response = req.send().await?;

        if self.config.enable_tracing {
            let status = response.status().as_u16();
            let content_length = response.content_length();

            if response.status().is_success() {
                debug!(status, content_length, "Response received");
            } else {
                info!(status, content_length, "Non-success response");
            }
        }

        Ok(Response::new(response))
    }

    /// Execute a request, decoding non-success responses into errors.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response> {
        self.execute(request).await?.check_meli_error().await
    }

    /// Execute a request and deserialize the JSON response.
    pub async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = self.send(request).await?;
        response.json().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Route;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> MeliHttpClient {
        MeliHttpClient::new(ClientConfig::builder().with_base_url(server.uri()).build()).unwrap()
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = MeliHttpClient::default_client().unwrap();
        assert_eq!(client.router().origin(), "https://api.mercadolibre.com");
    }

    #[tokio::test]
    async fn test_successful_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/items/MLA1"))
            .and(query_param("access_token", "tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "MLA1"
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let url = client
            .router()
            .route_to(Route::Items, &["MLA1"], &[("access_token", "tok")])
            .unwrap();

        let body: serde_json::Value = client.send_json(client.get(url)).await.unwrap();
        assert_eq!(body["id"], "MLA1");
    }

    #[tokio::test]
    async fn test_json_body_sets_content_type() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/items"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"title": "Chair"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "MLA2"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let url = client.router().route_to(Route::Items, &[], &()).unwrap();
        let request = client
            .post(url)
            .json(&serde_json::json!({"title": "Chair"}))
            .unwrap();

        let response = client.send(request).await.unwrap();
        assert_eq!(response.status(), 201);
    }

    #[tokio::test]
    async fn test_remote_error_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/items/MLA404"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "message": "Item with id MLA404 not found",
                "error": "not_found",
                "status": 404,
                "cause": []
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let url = client.router().route_to(Route::Items, &["MLA404"], &()).unwrap();
        let err = client.send(client.get(url)).await.unwrap_err();

        let remote = err.remote().expect("decoded remote error");
        assert_eq!(remote.code, "not_found");
        assert!(!err.is_remote_inconsistency());
    }

    #[tokio::test]
    async fn test_empty_error_body_is_inconsistency() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/items/MLA404"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let url = client.router().route_to(Route::Items, &["MLA404"], &()).unwrap();
        let err = client.send(client.get(url)).await.unwrap_err();

        assert!(err.is_remote_inconsistency());
    }

    #[tokio::test]
    async fn test_execute_returns_raw_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let url = client.router().route_to(Route::Users, &["me"], &()).unwrap();
        let response = client.execute(client.get(url)).await.unwrap();

        assert_eq!(response.status(), 401);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_injected_http_client() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/me"))
            .and(header("x-test-double", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 7})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("x-test-double", reqwest::header::HeaderValue::from_static("1"));
        let injected = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap();

        let client = client_for(&mock_server).with_http_client(injected);
        let url = client.router().route_to(Route::Users, &["me"], &()).unwrap();
        let body: serde_json::Value = client.send_json(client.get(url)).await.unwrap();

        assert_eq!(body["id"], 7);
    }

    #[test]
    fn test_write_family_ignores_base_path() {
        let client = MeliHttpClient::new(
            ClientConfig::builder()
                .with_base_url("http://127.0.0.1:9000/api")
                .build(),
        )
        .unwrap();
        let items = client.router().route_to(Route::Items, &["MLA1"], &()).unwrap();
        let token = client.router().route_to(Route::OAuthToken, &[], &()).unwrap();

        assert_eq!(client.write_family(&client.put(items.clone())).as_deref(), Some("items"));
        assert_eq!(client.write_family(&client.post(token)).as_deref(), Some("oauth"));
        assert_eq!(client.write_family(&client.get(items)), None);
    }

    #[test]
    fn test_write_family_disabled() {
        let client = MeliHttpClient::new(
            ClientConfig::builder()
                .with_base_url("http://127.0.0.1:9000")
                .with_serialized_writes(false)
                .build(),
        )
        .unwrap();
        let url = client.router().route_to(Route::Items, &[], &()).unwrap();
        assert_eq!(client.write_family(&client.post(url)), None);
    }
}
