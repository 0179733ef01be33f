//! Obscreen REST client
//!
//! Turns an [`ApiRequest`] into one HTTP call against the configured
//! instance, attaches the bearer key, encodes the body and classifies the
//! response.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use obscreen_core::ports::ApiExecutor;
use obscreen_core::search::{self, SearchKind};
use obscreen_domain::config::trim_trailing_slash;
use obscreen_domain::constants::CREDENTIAL_PROBE_PATH;
use obscreen_domain::{
    AdapterConfig, ApiRequest, HttpMethod, MultipartPayload, ObscreenError, RequestBody, Result,
    SearchResult,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};

use super::auth::{ApiKeyProvider, StaticApiKey};
use crate::http::HttpClient;

/// Executor backed by a live Obscreen instance
pub struct ObscreenClient {
    http_client: Arc<HttpClient>,
    auth: Arc<dyn ApiKeyProvider>,
    base_url: String,
}

impl ObscreenClient {
    /// Build a client from adapter configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ObscreenError::Config`] for a blank API key or when the HTTP
    /// client cannot be created.
    pub fn new(config: &AdapterConfig) -> Result<Self> {
        let mut http = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .accept_invalid_certs(config.accept_invalid_certs);
        if let Some(agent) = &config.user_agent {
            http = http.user_agent(agent.clone());
        }

        let auth = Arc::new(StaticApiKey::new(config.api_key.clone())?);

        Ok(Self::with_parts(config.base_url(), Arc::new(http.build()?), auth))
    }

    /// Assemble a client from explicit collaborators.
    pub fn with_parts(
        base_url: &str,
        http_client: Arc<HttpClient>,
        auth: Arc<dyn ApiKeyProvider>,
    ) -> Self {
        Self { http_client, auth, base_url: trim_trailing_slash(base_url).to_string() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check the stored credentials with `GET /api/playlists`.
    ///
    /// # Returns
    ///
    /// `true` when the instance accepts the key, `false` on 401 or 403
    ///
    /// # Errors
    ///
    /// Any other error status, or no response at all
    #[instrument(skip(self))]
    pub async fn probe_credentials(&self) -> Result<bool> {
        match self.execute(ApiRequest::get(CREDENTIAL_PROBE_PATH)).await {
            Ok(_) => {
                info!("Credentials accepted");
                Ok(true)
            }
            Err(ObscreenError::Api { status: status @ (401 | 403), message }) => {
                warn!(status, message = %message, "Credentials rejected");
                Ok(false)
            }
            Err(err) => {
                warn!(error = %err, "Credential probe failed");
                Err(err)
            }
        }
    }

    /// List picker lookup against this instance.
    pub async fn search(&self, kind: SearchKind, query: Option<&str>) -> Result<Vec<SearchResult>> {
        search::search(self, kind, query).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn encode_body(builder: RequestBuilder, body: RequestBody) -> Result<RequestBuilder> {
        Ok(match body {
            RequestBody::Empty => builder.header("Content-Type", "application/json"),
            RequestBody::Json(map) => builder.json(&map),
            // reqwest sets `multipart/form-data` with the boundary
            RequestBody::Multipart(payload) => builder.multipart(multipart_form(payload)?),
        })
    }
}

fn method_of(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn multipart_form(payload: MultipartPayload) -> Result<Form> {
    let mut form = Form::new();
    for (name, value) in payload.fields {
        form = form.text(name, value);
    }

    if let Some(file) = payload.file {
        let mime = file.file.mime_type.clone();
        let part = Part::bytes(file.file.data)
            .file_name(file.file.file_name)
            .mime_str(&mime)
            .map_err(|_| {
                ObscreenError::validation("mimeType", format!("`{mime}` is not a valid MIME type"))
            })?;
        form = form.part(file.field, part);
    }

    Ok(form)
}

/// Decode a 2xx body: empty becomes `{}`, non-JSON text is wrapped.
fn decode_success(text: &str) -> Value {
    if text.trim().is_empty() {
        return json!({});
    }
    serde_json::from_str(text).unwrap_or_else(|_| json!({ "response": text }))
}

/// Message for a failed response: the body's `message`/`error`, the raw
/// text, or the status reason.
fn status_message(status: StatusCode, text: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text) {
        for key in ["message", "error", "detail"] {
            if let Some(message) = map.get(key).and_then(Value::as_str) {
                return message.to_string();
            }
        }
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        status.canonical_reason().unwrap_or("unknown status").to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl ApiExecutor for ObscreenClient {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn execute(&self, request: ApiRequest) -> Result<Value> {
        let url = self.url(&request.path);
        let key = self.auth.api_key().await?;

        debug!(url = %url, body = request.body.kind(), "Obscreen request");

        let builder = self
            .http_client
            .request(method_of(request.method), &url)
            .header("Authorization", format!("Bearer {key}"));
        let builder = Self::encode_body(builder, request.body)?;

        let response = self.http_client.send(builder).await.map_err(|err| {
            warn!(url = %url, error = %err, "Obscreen request failed");
            err
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| ObscreenError::transport(format!("Failed to read response: {err}")))?;

        if !status.is_success() {
            let message = status_message(status, &text);
            warn!(url = %url, status = status.as_u16(), message = %message, "Obscreen API error");
            return Err(ObscreenError::api(status.as_u16(), message));
        }

        debug!(url = %url, status = status.as_u16(), "Obscreen response");
        Ok(decode_success(&text))
    }
}

#[cfg(test)]
mod tests {
    use obscreen_domain::{BinaryData, FilePart};
    use serde_json::Map;
    use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[derive(Clone)]
    struct MockKeyProvider {
        key: String,
    }

    #[async_trait]
    impl ApiKeyProvider for MockKeyProvider {
        async fn api_key(&self) -> Result<String> {
            Ok(self.key.clone())
        }
    }

    fn client_for(server: &MockServer) -> ObscreenClient {
        ObscreenClient::with_parts(
            &format!("{}/", server.uri()),
            Arc::new(HttpClient::new().unwrap()),
            Arc::new(MockKeyProvider { key: "test-key".to_string() }),
        )
    }

    #[tokio::test]
    async fn test_get_sends_bearer_and_decodes_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/playlists/7"))
            .and(header("Authorization", "Bearer test-key"))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let value = client.execute(ApiRequest::get("/api/playlists/7")).await.unwrap();

        assert_eq!(value, json!({"id": 7}));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ObscreenClient::with_parts(
            "https://screens.example.org/",
            Arc::new(HttpClient::new().unwrap()),
            Arc::new(MockKeyProvider { key: "k".to_string() }),
        );
        assert_eq!(client.url("/api/slides"), "https://screens.example.org/api/slides");
    }

    #[tokio::test]
    async fn test_query_string_is_preserved() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/contents/"))
            .and(query_param("folder_path", "/a b"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let value =
            client.execute(ApiRequest::get("/api/contents/?folder_path=%2Fa%20b")).await.unwrap();

        assert_eq!(value, json!([]));
    }

    #[tokio::test]
    async fn test_post_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/playlists"))
            .and(body_json(json!({"name": "Lobby", "enabled": false})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let mut body = Map::new();
        body.insert("name".into(), json!("Lobby"));
        body.insert("enabled".into(), json!(false));

        let client = client_for(&server);
        let value =
            client.execute(ApiRequest::post("/api/playlists").with_json(body)).await.unwrap();

        assert_eq!(value, json!({"id": 1}));
    }

    #[tokio::test]
    async fn test_multipart_body_carries_fields_and_file() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/contents/"))
            .and(body_string_contains("name=\"type\""))
            .and(body_string_contains("picture"))
            .and(body_string_contains("filename=\"logo.png\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 12})))
            .expect(1)
            .mount(&server)
            .await;

        let payload = MultipartPayload {
            fields: vec![("type".into(), "picture".into())],
            file: Some(FilePart {
                field: "object".into(),
                file: BinaryData::new("logo.png", "image/png", vec![1, 2, 3]),
            }),
        };

        let client = client_for(&server);
        client.execute(ApiRequest::post("/api/contents/").with_multipart(payload)).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let content_type = requests[0].headers.get("content-type").unwrap().to_str().unwrap();
        assert!(content_type.starts_with("multipart/form-data"));
    }

    #[tokio::test]
    async fn test_invalid_mime_type_is_validation_error() {
        let server = MockServer::start().await;
        let payload = MultipartPayload {
            fields: Vec::new(),
            file: Some(FilePart {
                field: "object".into(),
                file: BinaryData::new("x.bin", "not a mime", vec![0]),
            }),
        };

        let client = client_for(&server);
        let err = client
            .execute(ApiRequest::post("/api/contents/").with_multipart(payload))
            .await
            .unwrap_err();

        assert!(matches!(err, ObscreenError::Validation { .. }));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_success_body_is_empty_object() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/slides/3"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let value = client.execute(ApiRequest::delete("/api/slides/3")).await.unwrap();

        assert_eq!(value, json!({}));
    }

    #[tokio::test]
    async fn test_plain_text_success_is_wrapped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/processes/player-refresh"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let value =
            client.execute(ApiRequest::post("/api/processes/player-refresh")).await.unwrap();

        assert_eq!(value, json!({"response": "ok"}));
    }

    #[tokio::test]
    async fn test_error_status_carries_body_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/playlists/99"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "Playlist not found"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.execute(ApiRequest::get("/api/playlists/99")).await.unwrap_err();

        assert_eq!(err, ObscreenError::api(404, "Playlist not found"));
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_error_status_without_body_uses_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.execute(ApiRequest::get("/api/slides")).await.unwrap_err();

        assert_eq!(err, ObscreenError::api(500, "Internal Server Error"));
    }

    #[tokio::test]
    async fn test_probe_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/playlists"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/playlists"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        assert!(client_for(&server).probe_credentials().await.unwrap());

        let rejected = ObscreenClient::with_parts(
            &server.uri(),
            Arc::new(HttpClient::new().unwrap()),
            Arc::new(MockKeyProvider { key: "wrong".to_string() }),
        );
        assert!(!rejected.probe_credentials().await.unwrap());
    }

    #[tokio::test]
    async fn test_probe_credentials_propagates_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/playlists"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).probe_credentials().await.unwrap_err();
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn test_probe_credentials_forbidden_is_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/playlists"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        assert!(!client_for(&server).probe_credentials().await.unwrap());
    }

    #[tokio::test]
    async fn test_search_filters_remote_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/playlists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Lobby"},
                {"id": 2, "name": "Cafeteria"}
            ])))
            .mount(&server)
            .await;

        let results = client_for(&server).search(SearchKind::Playlists, Some("lob")).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Lobby");
    }

    #[test]
    fn test_new_rejects_blank_key() {
        let config = AdapterConfig::new("https://h", "");
        assert!(matches!(ObscreenClient::new(&config), Err(ObscreenError::Config { .. })));
    }
}
