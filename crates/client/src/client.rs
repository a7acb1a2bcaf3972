//! Batch processing client
//!
//! Drives the remote document-intelligence API: token acquisition, PDF
//! submission in sync or async execution, status polling, and health checks.

use std::time::{Duration, Instant};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use manifest_domain::constants::{
    BATCHES_ENDPOINT, BATCH_TYPE, DOCUMENT_TYPE, EXECUTION_ASYNC, EXECUTION_SYNC, FILE_TYPE_PDF,
    HEALTH_ENDPOINT, PROCESSING_TYPE, TOKEN_ENDPOINT,
};
use manifest_domain::{
    BatchRequest, BatchStatus, ErrorBody, ProcessingError, Result, TokenResponse,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Method, Response, StatusCode};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::http::{transport_error, HttpClient};

/// Client for the manifest exception processing API.
///
/// One instance holds one session token. The token lives behind an
/// [`RwLock`]: every authenticated call takes a read lock, and
/// [`authenticate`](Self::authenticate) holds the write lock for the whole
/// token exchange so overlapping re-authentications cannot interleave.
pub struct ManifestClient {
    config: ClientConfig,
    http: HttpClient,
    token: RwLock<Option<String>>,
    sync_timeout: Duration,
    poll_interval: Duration,
    wait_timeout: Duration,
}

impl ManifestClient {
    /// Create a client from the given configuration.
    ///
    /// # Errors
    /// Returns [`ProcessingError::Network`] if the underlying HTTP client
    /// cannot be initialized.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = HttpClient::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("manifest-client/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self {
            http,
            token: RwLock::new(None),
            sync_timeout: config.sync_timeout(),
            poll_interval: config.poll_interval(),
            wait_timeout: config.wait_timeout(),
            config,
        })
    }

    /// Override the delay between status polls.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Exchange the configured credentials for a bearer token.
    ///
    /// The token is stored for subsequent calls and also returned to the
    /// caller. Any non-200 status fails with
    /// [`ProcessingError::AuthenticationFailed`]; a 200 whose body cannot be
    /// decoded fails with [`ProcessingError::InvalidResponse`].
    #[instrument(skip(self))]
    pub async fn authenticate(&self) -> Result<String> {
        // Hold the write lock across the exchange so concurrent
        // re-authentications serialize and readers never observe a
        // half-updated token.
        let mut token_slot = self.token.write().await;

        let url = format!("{}{}", self.config.base_url, TOKEN_ENDPOINT);
        debug!(%url, username = %self.config.username, "requesting access token");

        let form = [
            ("username", self.config.username.as_str()),
            ("password", self.config.password.as_str()),
        ];
        let request = self.http.request(Method::POST, &url).form(&form);
        let response = self.http.send(request).await?;

        if response.status() != StatusCode::OK {
            warn!(status = %response.status(), "token endpoint rejected credentials");
            return Err(ProcessingError::AuthenticationFailed);
        }

        let token: TokenResponse = response.json().await.map_err(|err| {
            if err.is_decode() {
                ProcessingError::InvalidResponse
            } else {
                transport_error(err)
            }
        })?;

        *token_slot = Some(token.access_token.clone());
        info!("access token acquired");
        Ok(token.access_token)
    }

    /// Submit a PDF and block until the server returns the processed result.
    ///
    /// Uses the long sync transport budget since the server holds the
    /// request open for the whole processing run. The returned status
    /// carries the extraction output.
    ///
    /// # Errors
    /// [`ProcessingError::AuthenticationFailed`] without any network call if
    /// no token is stored; otherwise the standard response mapping.
    #[instrument(skip(self, document), fields(identifier = %identifier))]
    pub async fn submit_sync(&self, document: &[u8], identifier: &str) -> Result<BatchStatus> {
        let request = self.build_request(document, EXECUTION_SYNC, identifier, None);
        self.submit(&request, Some(self.sync_timeout)).await
    }

    /// Submit a PDF for background processing and return the acknowledgment.
    ///
    /// The server answers immediately with batch metadata and no output;
    /// callers poll for completion. When `batch_identifier` is `None` a
    /// random lowercase identifier is generated so the caller always has a
    /// polling handle.
    ///
    /// # Errors
    /// Same mapping as [`submit_sync`](Self::submit_sync).
    #[instrument(skip(self, document), fields(identifier = %identifier))]
    pub async fn submit_async(
        &self,
        document: &[u8],
        identifier: &str,
        batch_identifier: Option<String>,
    ) -> Result<BatchStatus> {
        let batch_identifier = batch_identifier.unwrap_or_else(|| Uuid::new_v4().to_string());
        let request =
            self.build_request(document, EXECUTION_ASYNC, identifier, Some(batch_identifier));
        self.submit(&request, None).await
    }

    /// Fetch the current status snapshot for a batch.
    #[instrument(skip(self))]
    pub async fn get_status(&self, batch_id: &str) -> Result<BatchStatus> {
        let token = self.bearer_token().await?;
        let url = format!("{}{}/{}", self.config.base_url, BATCHES_ENDPOINT, batch_id);

        let request = self
            .http
            .request(Method::GET, &url)
            .header("Authorization", format!("Bearer {token}"));
        let response = self.http.send(request).await?;

        Self::decode_status(response).await
    }

    /// Poll a batch until it reaches a terminal state or `timeout` elapses.
    ///
    /// Defaults to the configured wait budget when `timeout` is `None`. A
    /// failed poll aborts the whole wait; the error propagates unchanged.
    ///
    /// # Errors
    /// [`ProcessingError::Timeout`] once the budget is exhausted without a
    /// terminal state. The last non-terminal snapshot is discarded.
    #[instrument(skip(self))]
    pub async fn wait_for_completion(
        &self,
        batch_id: &str,
        timeout: Option<Duration>,
    ) -> Result<BatchStatus> {
        let budget = timeout.unwrap_or(self.wait_timeout);
        let started = Instant::now();

        while started.elapsed() < budget {
            let status = self.get_status(batch_id).await?;
            if status.metadata.is_terminal() {
                info!(batch_id, state = %status.metadata.state, "batch reached terminal state");
                return Ok(status);
            }

            debug!(batch_id, state = %status.metadata.state, "batch still processing");
            tokio::time::sleep(self.poll_interval).await;
        }

        warn!(batch_id, "timed out waiting for batch completion");
        Err(ProcessingError::Timeout)
    }

    /// Whether the API answers its health endpoint with a 200.
    ///
    /// Never fails: transport errors and non-200 statuses both report an
    /// unhealthy service.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> bool {
        let url = format!("{}{}", self.config.base_url, HEALTH_ENDPOINT);

        let request = self.http.request(Method::GET, &url);
        match self.http.send(request).await {
            Ok(response) => response.status() == StatusCode::OK,
            Err(err) => {
                debug!(error = %err, "health check failed");
                false
            }
        }
    }

    /// Current session token.
    async fn bearer_token(&self) -> Result<String> {
        self.token.read().await.clone().ok_or(ProcessingError::AuthenticationFailed)
    }

    fn build_request(
        &self,
        document: &[u8],
        execution_type: &str,
        identifier: &str,
        batch_identifier: Option<String>,
    ) -> BatchRequest {
        BatchRequest {
            batch_identifier,
            batch_type: BATCH_TYPE.to_string(),
            document_type: DOCUMENT_TYPE.to_string(),
            processing_type: PROCESSING_TYPE.to_string(),
            execution_type: execution_type.to_string(),
            identifier: identifier.to_string(),
            file_type: FILE_TYPE_PDF.to_string(),
            document: BASE64.encode(document),
        }
    }

    /// POST one submission. Sync and async share this path so their error
    /// handling cannot drift apart; they differ only in the execution tag
    /// and the transport budget.
    async fn submit(
        &self,
        request: &BatchRequest,
        timeout: Option<Duration>,
    ) -> Result<BatchStatus> {
        let token = self.bearer_token().await?;
        let url = format!("{}{}", self.config.base_url, BATCHES_ENDPOINT);
        debug!(%url, execution = %request.execution_type, "submitting batch");

        let mut builder = self
            .http
            .request(Method::POST, &url)
            .header("Authorization", format!("Bearer {token}"))
            .json(request);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = self.http.send(builder).await?;
        Self::decode_status(response).await
    }

    /// Shared response mapping for every batch endpoint.
    async fn decode_status(response: Response) -> Result<BatchStatus> {
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if status != StatusCode::OK {
            return Err(Self::status_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|_| ProcessingError::InvalidResponse)
    }

    /// Non-200 bodies carry a `{detail}` payload when the server produced
    /// the failure itself; anything else is reported by status code alone.
    fn status_error(status: StatusCode, body: &str) -> ProcessingError {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(err) => ProcessingError::Api(err.detail),
            Err(_) => ProcessingError::Api(format!("HTTP {}", status.as_u16())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use serde_json::{json, Value};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::*;

    fn config_for(base_url: String) -> ClientConfig {
        ClientConfig {
            base_url,
            username: "ops".to_string(),
            password: "s@crest pass".to_string(),
            accept_invalid_certs: false,
            request_timeout_secs: 5,
            sync_timeout_secs: 5,
            poll_interval_secs: 10,
            wait_timeout_secs: 300,
        }
    }

    fn test_config(server: &MockServer) -> ClientConfig {
        config_for(server.uri())
    }

    fn token_body() -> Value {
        json!({"accessToken": "tok-123", "tokenType": "bearer"})
    }

    fn pending_status_body(state: &str) -> Value {
        json!({
            "metadata": {
                "identifier": "batch-9",
                "state": state,
                "result": "pending",
                "createdAt": "2025-03-14T09:26:53Z",
                "documentCount": 1,
                "processingMode": "single_pass",
                "batchType": "manifestExceptions"
            }
        })
    }

    fn completed_status_body() -> Value {
        json!({
            "metadata": {
                "identifier": "batch-9",
                "originalFilename": "manifest.pdf",
                "state": "finalized",
                "result": "success",
                "createdAt": "2025-03-14T09:26:53Z",
                "stateUpdatedAt": "2025-03-14T09:28:10Z",
                "documentCount": 1,
                "processingMode": "single_pass",
                "batchType": "manifestExceptions"
            },
            "output": {
                "metadata": {
                    "documentType": "manifestException",
                    "state": "finalized",
                    "result": "success",
                    "processedAt": "2025-03-14T09:28:09Z"
                },
                "general": {
                    "manifestInfo": {
                        "manifestNumber": "M-1",
                        "tripNumber": "T-1",
                        "trailerNumber": "TR-1",
                        "expectedShipments": 1,
                        "expectedHandlingUnits": 2,
                        "actualShipments": 1,
                        "actualHandlingUnits": 1
                    },
                    "shipments": [{
                        "proNumber": "551-1",
                        "expectedPieces": 2,
                        "actualPieces": 1,
                        "weight": 300,
                        "description": "Crated pumps",
                        "exceptionType": "shortage",
                        "exceptionDetails": {"shortagePieces": 1},
                        "markupNotations": ["short 1"],
                        "highlightColor": "yellow"
                    }],
                    "summary": {
                        "totalOverages": 0,
                        "totalShortages": 1,
                        "totalDamages": 0,
                        "totalOveragePieces": 0,
                        "totalShortagePieces": 1,
                        "totalDamagedPieces": 0,
                        "hasOSDNotation": true
                    }
                }
            }
        })
    }

    async fn mount_token_endpoint(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/api/v1/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
            .mount(server)
            .await;
    }

    async fn authenticated_client(server: &MockServer) -> ManifestClient {
        mount_token_endpoint(server).await;
        let client = ManifestClient::new(test_config(server)).expect("client");
        client.authenticate().await.expect("authenticate");
        client
    }

    #[tokio::test]
    async fn authenticate_stores_and_returns_token() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server).await;

        let client = ManifestClient::new(test_config(&server)).expect("client");
        let token = client.authenticate().await.expect("authenticate");

        assert_eq!(token, "tok-123");

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let body = String::from_utf8(requests[0].body.clone()).unwrap();
        assert!(body.contains("username=ops"));
        // The form serializer percent-encodes the password
        assert!(body.contains("password=s%40crest+pass"));
    }

    #[tokio::test]
    async fn authenticate_rejection_maps_to_authentication_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/token"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "bad creds"})))
            .mount(&server)
            .await;

        let client = ManifestClient::new(test_config(&server)).expect("client");
        let result = client.authenticate().await;

        assert!(matches!(result, Err(ProcessingError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn authenticate_garbage_body_maps_to_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = ManifestClient::new(test_config(&server)).expect("client");
        let result = client.authenticate().await;

        assert!(matches!(result, Err(ProcessingError::InvalidResponse)));
    }

    #[tokio::test]
    async fn operations_fail_fast_without_token() {
        let server = MockServer::start().await;
        let client = ManifestClient::new(test_config(&server)).expect("client");

        let sync = client.submit_sync(b"%PDF-1.4", "job-1").await;
        let asynchronous = client.submit_async(b"%PDF-1.4", "job-1", None).await;
        let status = client.get_status("batch-9").await;

        assert!(matches!(sync, Err(ProcessingError::AuthenticationFailed)));
        assert!(matches!(asynchronous, Err(ProcessingError::AuthenticationFailed)));
        assert!(matches!(status, Err(ProcessingError::AuthenticationFailed)));

        // No request may reach the network before a token exists
        let requests = server.received_requests().await.unwrap();
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn submit_sync_returns_completed_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/batches"))
            .and(header("Authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completed_status_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = authenticated_client(&server).await;
        let status = client.submit_sync(b"%PDF-1.4 fake", "job-1").await.expect("status");

        assert_eq!(status.metadata.state, "finalized");
        let output = status.output.expect("sync responses carry output");
        assert_eq!(output.general.shipments.len(), 1);
        assert_eq!(output.general.shipments[0].pro_number, "551-1");
    }

    #[tokio::test]
    async fn sync_and_async_requests_differ_only_in_execution_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/batches"))
            .respond_with(ResponseTemplate::new(200).set_body_json(pending_status_body("queued")))
            .mount(&server)
            .await;

        let client = authenticated_client(&server).await;
        client.submit_sync(b"%PDF-1.4", "job-1").await.expect("sync");
        client.submit_async(b"%PDF-1.4", "job-1", None).await.expect("async");

        let requests = server.received_requests().await.unwrap();
        let submissions: Vec<Value> = requests
            .iter()
            .filter(|r| r.url.path() == "/api/v1/batches")
            .map(|r| serde_json::from_slice(&r.body).unwrap())
            .collect();
        assert_eq!(submissions.len(), 2);

        let mut sync_body = submissions[0].clone();
        let mut async_body = submissions[1].clone();
        assert_eq!(sync_body["executionType"], "sync");
        assert_eq!(async_body["executionType"], "async");
        assert!(sync_body.get("batchIdentifier").is_none());
        assert!(async_body.get("batchIdentifier").is_some());

        // Everything else must be identical between the two modes
        sync_body.as_object_mut().unwrap().remove("executionType");
        let async_obj = async_body.as_object_mut().unwrap();
        async_obj.remove("executionType");
        async_obj.remove("batchIdentifier");
        assert_eq!(sync_body, async_body);
    }

    #[tokio::test]
    async fn submit_async_generates_distinct_batch_identifiers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/batches"))
            .respond_with(ResponseTemplate::new(200).set_body_json(pending_status_body("queued")))
            .mount(&server)
            .await;

        let client = authenticated_client(&server).await;
        client.submit_async(b"%PDF-1.4", "job-1", None).await.expect("first");
        client.submit_async(b"%PDF-1.4", "job-1", None).await.expect("second");

        let requests = server.received_requests().await.unwrap();
        let ids: Vec<String> = requests
            .iter()
            .filter(|r| r.url.path() == "/api/v1/batches")
            .map(|r| {
                let body: Value = serde_json::from_slice(&r.body).unwrap();
                body["batchIdentifier"].as_str().unwrap().to_string()
            })
            .collect();

        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
        assert_eq!(ids[0], ids[0].to_lowercase());
    }

    #[tokio::test]
    async fn submit_async_honors_caller_batch_identifier() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/batches"))
            .respond_with(ResponseTemplate::new(200).set_body_json(pending_status_body("queued")))
            .mount(&server)
            .await;

        let client = authenticated_client(&server).await;
        client
            .submit_async(b"%PDF-1.4", "job-1", Some("replay-batch-7".to_string()))
            .await
            .expect("submission");

        let requests = server.received_requests().await.unwrap();
        let submission = requests.iter().find(|r| r.url.path() == "/api/v1/batches").unwrap();
        let body: Value = serde_json::from_slice(&submission.body).unwrap();
        assert_eq!(body["batchIdentifier"], "replay-batch-7");
    }

    #[tokio::test]
    async fn api_detail_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/batches"))
            .respond_with(
                ResponseTemplate::new(422).set_body_json(json!({"detail": "bad document"})),
            )
            .mount(&server)
            .await;

        let client = authenticated_client(&server).await;
        let result = client.submit_sync(b"not a pdf", "job-1").await;

        match result {
            Err(ProcessingError::Api(detail)) => assert_eq!(detail, "bad document"),
            other => panic!("expected api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn undecodable_error_body_maps_to_status_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/batches/batch-9"))
            .respond_with(ResponseTemplate::new(503).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = authenticated_client(&server).await;
        let result = client.get_status("batch-9").await;

        match result {
            Err(ProcessingError::Api(detail)) => assert_eq!(detail, "HTTP 503"),
            other => panic!("expected api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn success_with_garbage_body_maps_to_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/batches/batch-9"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
            .mount(&server)
            .await;

        let client = authenticated_client(&server).await;
        let result = client.get_status("batch-9").await;

        assert!(matches!(result, Err(ProcessingError::InvalidResponse)));
    }

    #[tokio::test]
    async fn wait_for_completion_stops_at_terminal_state() {
        let server = MockServer::start().await;
        let polls = Arc::new(AtomicUsize::new(0));
        let polls_clone = polls.clone();
        Mock::given(method("GET"))
            .and(path("/api/v1/batches/batch-9"))
            .respond_with(move |_req: &Request| -> ResponseTemplate {
                let current = polls_clone.fetch_add(1, Ordering::SeqCst);
                let body = match current {
                    0 => pending_status_body("queued"),
                    1 => pending_status_body("processing"),
                    _ => completed_status_body(),
                };
                ResponseTemplate::new(200).set_body_json(body)
            })
            .mount(&server)
            .await;

        let client = authenticated_client(&server)
            .await
            .with_poll_interval(Duration::from_millis(20));
        let status = client
            .wait_for_completion("batch-9", Some(Duration::from_secs(5)))
            .await
            .expect("completion");

        assert_eq!(status.metadata.state, "finalized");
        assert_eq!(polls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn wait_for_completion_times_out_after_final_window_poll() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/batches/batch-9"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(pending_status_body("processing")),
            )
            .mount(&server)
            .await;

        // Budget of three whole poll intervals: polls fire at 0, 1, and 2
        // intervals of elapsed time, and the loop exits before a fourth.
        let client = authenticated_client(&server)
            .await
            .with_poll_interval(Duration::from_millis(100));
        let result = client.wait_for_completion("batch-9", Some(Duration::from_millis(300))).await;

        assert!(matches!(result, Err(ProcessingError::Timeout)));
        let poll_count = server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.url.path() == "/api/v1/batches/batch-9")
            .count();
        assert_eq!(poll_count, 3);
    }

    #[tokio::test]
    async fn wait_for_completion_aborts_on_poll_failure() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server).await;
        Mock::given(method("GET"))
            .and(path("/api/v1/batches/batch-9"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(pending_status_body("processing"))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let mut config = test_config(&server);
        config.request_timeout_secs = 1;
        let client = ManifestClient::new(config).expect("client");
        client.authenticate().await.expect("authenticate");

        // The first poll dies at the transport timeout, well inside the wait
        // budget, and must surface as a network failure rather than Timeout
        let result = client.wait_for_completion("batch-9", Some(Duration::from_secs(30))).await;

        match result {
            Err(ProcessingError::Network(msg)) => {
                assert_eq!(msg, "HTTP request timed out");
            }
            other => panic!("expected network error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn health_check_true_only_on_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/health"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = ManifestClient::new(test_config(&server)).expect("client");
        assert!(client.health_check().await);

        // Health probes carry no bearer header
        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("Authorization").is_none());
    }

    #[tokio::test]
    async fn health_check_false_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/health"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = ManifestClient::new(test_config(&server)).expect("client");
        assert!(!client.health_check().await);
    }

    #[tokio::test]
    async fn health_check_false_on_transport_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so that requests fail with ECONNREFUSED

        let client = ManifestClient::new(config_for(format!("http://{}", addr))).expect("client");
        assert!(!client.health_check().await);
    }

    #[tokio::test]
    async fn completed_payload_round_trips_for_display() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/batches/batch-9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completed_status_body()))
            .mount(&server)
            .await;

        let client = authenticated_client(&server).await;
        let status = client.get_status("batch-9").await.expect("status");

        let reencoded = serde_json::to_value(&status).unwrap();
        assert_eq!(reencoded, completed_status_body());
    }
}
