//! CSRF-aware HTTP client
//!
//! Every backend call goes through [`ApiClient::send`]:
//! - Mutating requests (anything but GET, HEAD, OPTIONS, TRACE) carry the
//!   cached CSRF token in `X-CSRF-Token`; read-only requests never do.
//! - A CSRF rejection triggers exactly one token refresh followed by exactly
//!   one retry. The refresh is awaited and cached before the retry is sent.
//! - A 401 sends the navigator to the login location and notifies the
//!   unauthorized-listeners. Credentials live in an http-only cookie held by
//!   the cookie jar, so nothing is cleaned up locally.
//! - Transport errors and every other non-success status propagate unchanged.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use http::{HeaderValue, Method, StatusCode};
use kernel::envelope::ErrorEnvelope;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::{CSRF_INVALID_CODE, CSRF_INVALID_MESSAGE, ClientConfig};
use crate::csrf::{CsrfToken, CsrfTokenCache};
use crate::error::{ClientError, ClientResult};
use crate::navigation::Navigator;
use crate::retry::RetryPolicy;

/// Callback invoked after every 401 response
pub type UnauthorizedListener = Arc<dyn Fn() + Send + Sync>;

/// Handle returned by [`ApiClient::on_unauthorized`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

// ============================================================================
// Request / Response
// ============================================================================

/// A replayable request description
///
/// The body is kept as a JSON value so the same request can be dispatched a
/// second time after a token refresh.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ClientResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Whether the method changes server state and therefore needs a CSRF token
    #[inline]
    pub fn is_mutating(&self) -> bool {
        !self.method.is_safe()
    }
}

/// A fully buffered response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    body: Vec<u8>,
}

impl ApiResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Decode the body; an empty body decodes as JSON `null`
    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        let body: &[u8] = if self.body.is_empty() {
            b"null"
        } else {
            &self.body
        };
        Ok(serde_json::from_slice(body)?)
    }
}

/// Body of the CSRF refresh endpoint
#[derive(Debug, Deserialize)]
struct CsrfTokenResponse {
    #[serde(alias = "csrfToken")]
    token: String,
}

/// Whether a rejection means "the CSRF token is missing or stale"
///
/// The backend's machine-readable code is checked first; older deployments
/// only send the middleware's message text.
pub fn is_csrf_rejection(status: StatusCode, body: &ErrorEnvelope) -> bool {
    status == StatusCode::FORBIDDEN
        && (body.code.as_deref() == Some(CSRF_INVALID_CODE) || body.mentions(CSRF_INVALID_MESSAGE))
}

// ============================================================================
// Client
// ============================================================================

struct ClientInner {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    csrf: CsrfTokenCache,
    navigator: Arc<dyn Navigator>,
    listeners: RwLock<Vec<(ListenerId, UnauthorizedListener)>>,
    next_listener_id: AtomicU64,
}

/// HTTP client wrapper shared by every feature crate
///
/// Cheap to clone; clones share the cookie jar, token cache and listeners.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

impl ApiClient {
    /// Build a client with its own cookie jar
    pub fn new(
        config: ClientConfig,
        csrf: CsrfTokenCache,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                config: Arc::new(config),
                csrf,
                navigator,
                listeners: RwLock::new(Vec::new()),
                next_listener_id: AtomicU64::new(0),
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The token cache this client reads from and writes to
    pub fn csrf(&self) -> &CsrfTokenCache {
        &self.inner.csrf
    }

    /// Register a callback for 401 responses
    pub fn on_unauthorized(&self, listener: impl Fn() + Send + Sync + 'static) -> ListenerId {
        let id = ListenerId(self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed));
        self.inner.listeners.write().push((id, Arc::new(listener)));
        id
    }

    pub fn remove_listener(&self, id: ListenerId) {
        self.inner
            .listeners
            .write()
            .retain(|(listener_id, _)| *listener_id != id);
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.read().len()
    }

    // ========================================================================
    // Convenience wrappers
    // ========================================================================

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(&ApiRequest::get(path)).await?.json()
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(&ApiRequest::post(path).json(body)?).await?.json()
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(&ApiRequest::put(path).json(body)?).await?.json()
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(&ApiRequest::patch(path).json(body)?).await?.json()
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(&ApiRequest::delete(path)).await?.json()
    }

    // ========================================================================
    // Core
    // ========================================================================

    /// Send a request, refreshing the CSRF token and retrying at most once
    pub async fn send(&self, request: &ApiRequest) -> ClientResult<ApiResponse> {
        if request.is_mutating() && self.inner.csrf.is_empty() {
            tracing::debug!(path = %request.path, "No CSRF token cached, fetching one");
            self.refresh_csrf_token().await?;
        }

        let mut attempt = RetryPolicy::default();
        loop {
            let response = self.dispatch(request).await?;
            let status = response.status();

            if attempt.is_retry() {
                tracing::debug!(
                    method = %request.method,
                    path = %request.path,
                    status = status.as_u16(),
                    "Retried with refreshed CSRF token"
                );
            }

            if status.is_success() {
                return Ok(response);
            }

            if status == StatusCode::UNAUTHORIZED {
                self.handle_unauthorized(request);
                return Err(ClientError::Unauthorized);
            }

            let body = ErrorEnvelope::from_body(response.bytes());

            if request.is_mutating() && is_csrf_rejection(status, &body) {
                match attempt.next() {
                    Some(next) => {
                        tracing::debug!(
                            method = %request.method,
                            path = %request.path,
                            "CSRF token rejected, refreshing before retry"
                        );
                        self.refresh_csrf_token().await?;
                        attempt = next;
                        continue;
                    }
                    None => {
                        tracing::warn!(
                            method = %request.method,
                            path = %request.path,
                            "CSRF token rejected again after refresh"
                        );
                    }
                }
            }

            return Err(ClientError::Api { status, body });
        }
    }

    /// Fetch a fresh CSRF token and store it in the cache
    ///
    /// Any failure is wrapped in [`ClientError::CsrfRefresh`].
    pub async fn refresh_csrf_token(&self) -> ClientResult<CsrfToken> {
        self.fetch_csrf_token()
            .await
            .map_err(|e| ClientError::CsrfRefresh(Box::new(e)))
    }

    async fn fetch_csrf_token(&self) -> ClientResult<CsrfToken> {
        let request = ApiRequest::get(self.inner.config.csrf_refresh_path.clone());
        let response = self.dispatch(&request).await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized(&request);
            return Err(ClientError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ClientError::Api {
                status,
                body: ErrorEnvelope::from_body(response.bytes()),
            });
        }

        let payload: CsrfTokenResponse = response.json()?;
        let token = CsrfToken::new(payload.token);
        if token.is_blank() {
            return Err(ClientError::MissingCsrfToken);
        }

        self.inner.csrf.set(token.clone());
        Ok(token)
    }

    async fn dispatch(&self, request: &ApiRequest) -> ClientResult<ApiResponse> {
        let config = &self.inner.config;
        let url = config.endpoint(&request.path)?;

        let mut builder = self.inner.http.request(request.method.clone(), url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if request.is_mutating() {
            if let Some(token) = self.inner.csrf.get() {
                let mut value = HeaderValue::from_str(token.as_str())
                    .map_err(|_| ClientError::InvalidHeader(config.csrf_header.clone()))?;
                value.set_sensitive(true);
                builder = builder.header(config.csrf_header.as_str(), value);
            }
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            "Request completed"
        );

        Ok(ApiResponse { status, body })
    }

    fn handle_unauthorized(&self, request: &ApiRequest) {
        tracing::info!(
            method = %request.method,
            path = %request.path,
            "Unauthorized response, redirecting to login"
        );
        self.inner
            .navigator
            .redirect(&self.inner.config.login_location);

        // Listeners run outside the lock so they may register or remove listeners
        let listeners: Vec<UnauthorizedListener> = self
            .inner
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener();
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.config.base_url.as_str())
            .field("csrf", &self.inner.csrf)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::MemoryNavigator;
    use serde_json::{Value, json};
    use std::sync::atomic::AtomicUsize;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> (ApiClient, CsrfTokenCache, Arc<MemoryNavigator>) {
        let config = ClientConfig::with_base_url(&server.uri()).unwrap();
        let csrf = CsrfTokenCache::new();
        let navigator = Arc::new(MemoryNavigator::new());
        let client = ApiClient::new(config, csrf.clone(), navigator.clone()).unwrap();
        (client, csrf, navigator)
    }

    fn csrf_rejection() -> ResponseTemplate {
        ResponseTemplate::new(403).set_body_json(json!({
            "success": false,
            "error": "Invalid or missing CSRF token"
        }))
    }

    async fn requests_to(server: &MockServer, method_name: &str, route: &str) -> Vec<wiremock::Request> {
        server
            .received_requests()
            .await
            .expect("request recording is enabled")
            .into_iter()
            .filter(|r| r.method.as_str() == method_name && r.url.path() == route)
            .collect()
    }

    #[test]
    fn test_mutating_methods() {
        assert!(!ApiRequest::get("/api/players").is_mutating());
        assert!(!ApiRequest::new(Method::HEAD, "/").is_mutating());
        assert!(!ApiRequest::new(Method::OPTIONS, "/").is_mutating());
        assert!(ApiRequest::post("/api/players").is_mutating());
        assert!(ApiRequest::put("/api/players/1").is_mutating());
        assert!(ApiRequest::patch("/api/players/1").is_mutating());
        assert!(ApiRequest::delete("/api/players/1").is_mutating());
    }

    #[test]
    fn test_csrf_rejection_detection() {
        let legacy = ErrorEnvelope {
            error: Some("Invalid or missing CSRF token".to_string()),
            ..ErrorEnvelope::default()
        };
        assert!(is_csrf_rejection(StatusCode::FORBIDDEN, &legacy));
        assert!(!is_csrf_rejection(StatusCode::BAD_REQUEST, &legacy));

        let coded = ErrorEnvelope {
            code: Some("CSRF_INVALID".to_string()),
            ..ErrorEnvelope::default()
        };
        assert!(is_csrf_rejection(StatusCode::FORBIDDEN, &coded));

        let role = ErrorEnvelope {
            error: Some("Head coach role required".to_string()),
            ..ErrorEnvelope::default()
        };
        assert!(!is_csrf_rejection(StatusCode::FORBIDDEN, &role));
    }

    #[test]
    fn test_empty_body_decodes_as_unit() {
        let response = ApiResponse {
            status: StatusCode::NO_CONTENT,
            body: Vec::new(),
        };
        let decoded: ClientResult<()> = response.json();
        assert!(decoded.is_ok());
    }

    #[tokio::test]
    async fn test_header_only_on_mutating_requests() {
        let server = MockServer::start().await;
        let (client, csrf, _) = client_for(&server);
        csrf.set(CsrfToken::new("token-1"));

        Mock::given(method("GET"))
            .and(path("/api/players"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/players"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "success": true })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/players/3"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let _: Value = client.get("/api/players").await.unwrap();
        let _: Value = client
            .post("/api/players", &json!({ "first_name": "Sam" }))
            .await
            .unwrap();
        let _: () = client.delete("/api/players/3").await.unwrap();

        let reads = requests_to(&server, "GET", "/api/players").await;
        assert_eq!(reads.len(), 1);
        assert!(reads[0].headers.get("x-csrf-token").is_none());

        let creates = requests_to(&server, "POST", "/api/players").await;
        assert_eq!(creates[0].headers.get("x-csrf-token").unwrap(), "token-1");

        let deletes = requests_to(&server, "DELETE", "/api/players/3").await;
        assert_eq!(deletes[0].headers.get("x-csrf-token").unwrap(), "token-1");
    }

    #[tokio::test]
    async fn test_stale_token_refreshes_once_and_retries_with_new_token() {
        let server = MockServer::start().await;
        let (client, csrf, navigator) = client_for(&server);
        csrf.set(CsrfToken::new("stale"));

        Mock::given(method("POST"))
            .and(path("/api/recruits"))
            .and(header("X-CSRF-Token", "stale"))
            .respond_with(csrf_rejection())
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/csrf-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "fresh" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/recruits"))
            .and(header("X-CSRF-Token", "fresh"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 12 })))
            .expect(1)
            .mount(&server)
            .await;

        let created: Value = client
            .post("/api/recruits", &json!({ "first_name": "Jordan" }))
            .await
            .unwrap();

        assert_eq!(created["id"], 12);
        assert_eq!(csrf.get().unwrap().as_str(), "fresh");
        assert_eq!(navigator.redirect_count(), 0);

        // The retry replays the original body
        let attempts = requests_to(&server, "POST", "/api/recruits").await;
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].body, attempts[1].body);
    }

    #[tokio::test]
    async fn test_retry_failure_is_returned_without_second_refresh() {
        let server = MockServer::start().await;
        let (client, csrf, _) = client_for(&server);
        csrf.set(CsrfToken::new("stale"));

        Mock::given(method("PUT"))
            .and(path("/api/teams/4"))
            .respond_with(csrf_rejection())
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/csrf-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "fresh" })))
            .expect(1)
            .mount(&server)
            .await;

        let result: ClientResult<Value> = client.put("/api/teams/4", &json!({ "name": "JV" })).await;

        match result {
            Err(ClientError::Api { status, body }) => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert!(body.mentions("CSRF"));
            }
            other => panic!("expected the retried rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_refresh_failure_propagates_refresh_error() {
        let server = MockServer::start().await;
        let (client, csrf, _) = client_for(&server);
        csrf.set(CsrfToken::new("stale"));

        Mock::given(method("POST"))
            .and(path("/api/scouting-reports"))
            .respond_with(csrf_rejection())
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/csrf-token"))
            .respond_with(
                ResponseTemplate::new(503).set_body_json(json!({ "error": "maintenance" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result: ClientResult<Value> = client
            .post("/api/scouting-reports", &json!({ "grade": "A" }))
            .await;

        match result {
            Err(ClientError::CsrfRefresh(inner)) => {
                assert_eq!(inner.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
            }
            other => panic!("expected refresh error, got {:?}", other),
        }
        // The stale token stays until something replaces it
        assert_eq!(csrf.get().unwrap().as_str(), "stale");
    }

    #[tokio::test]
    async fn test_csrf_rejection_on_read_is_not_retried() {
        let server = MockServer::start().await;
        let (client, csrf, _) = client_for(&server);
        csrf.set(CsrfToken::new("token-1"));

        Mock::given(method("GET"))
            .and(path("/api/recruits"))
            .respond_with(csrf_rejection())
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/csrf-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "unused" })))
            .expect(0)
            .mount(&server)
            .await;

        let result: ClientResult<Value> = client.get("/api/recruits").await;

        match result {
            Err(ClientError::Api { status, body }) => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert!(body.mentions("Invalid or missing CSRF token"));
            }
            other => panic!("expected api error, got {:?}", other),
        }
        assert_eq!(csrf.get().unwrap().as_str(), "token-1");
    }

    #[tokio::test]
    async fn test_unauthorized_refresh_redirects_once() {
        let server = MockServer::start().await;
        let (client, csrf, navigator) = client_for(&server);
        csrf.set(CsrfToken::new("stale"));

        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        client.on_unauthorized(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        Mock::given(method("PUT"))
            .and(path("/api/teams/2"))
            .respond_with(csrf_rejection())
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/csrf-token"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let result: ClientResult<Value> = client.put("/api/teams/2", &json!({ "name": "JV" })).await;

        match result {
            Err(ClientError::CsrfRefresh(inner)) => {
                assert!(matches!(*inner, ClientError::Unauthorized));
            }
            other => panic!("expected refresh error, got {:?}", other),
        }
        assert_eq!(navigator.location(), Some("/login".to_string()));
        assert_eq!(navigator.redirect_count(), 1);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unauthorized_redirects_once_and_keeps_token() {
        let server = MockServer::start().await;
        let (client, csrf, navigator) = client_for(&server);
        csrf.set(CsrfToken::new("token-1"));

        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        client.on_unauthorized(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        Mock::given(method("GET"))
            .and(path("/api/schedules"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Not authenticated" })))
            .expect(1)
            .mount(&server)
            .await;

        let result: ClientResult<Value> = client.get("/api/schedules").await;

        assert!(matches!(result, Err(ClientError::Unauthorized)));
        assert_eq!(navigator.location(), Some("/login".to_string()));
        assert_eq!(navigator.redirect_count(), 1);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(csrf.get().unwrap().as_str(), "token-1");
    }

    #[tokio::test]
    async fn test_removed_listener_is_not_called() {
        let server = MockServer::start().await;
        let (client, _, _) = client_for(&server);

        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let id = client.on_unauthorized(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        client.remove_listener(id);

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let _ = client.get::<Value>("/auth/me").await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_cache_primes_token_before_mutating_request() {
        let server = MockServer::start().await;
        let (client, csrf, _) = client_for(&server);

        Mock::given(method("GET"))
            .and(path("/auth/csrf-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "primed" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/teams"))
            .and(header("X-CSRF-Token", "primed"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 2 })))
            .expect(1)
            .mount(&server)
            .await;

        let _: Value = client.post("/api/teams", &json!({ "name": "Varsity" })).await.unwrap();
        assert_eq!(csrf.get().unwrap().as_str(), "primed");
    }

    #[tokio::test]
    async fn test_other_forbidden_responses_are_not_retried() {
        let server = MockServer::start().await;
        let (client, csrf, _) = client_for(&server);
        csrf.set(CsrfToken::new("token-1"));

        Mock::given(method("DELETE"))
            .and(path("/api/players/9"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "success": false,
                "error": "Head coach role required"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/csrf-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "unused" })))
            .expect(0)
            .mount(&server)
            .await;

        let result: ClientResult<()> = client.delete("/api/players/9").await;
        assert_eq!(
            result.unwrap_err().status(),
            Some(StatusCode::FORBIDDEN)
        );
    }

    #[tokio::test]
    async fn test_machine_readable_code_triggers_refresh() {
        let server = MockServer::start().await;
        let (client, csrf, _) = client_for(&server);
        csrf.set(CsrfToken::new("old"));

        Mock::given(method("PATCH"))
            .and(path("/api/depth-chart"))
            .and(header("X-CSRF-Token", "old"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "code": "CSRF_INVALID" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/csrf-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "csrfToken": "new" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/api/depth-chart"))
            .and(header("X-CSRF-Token", "new"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let _: () = client
            .patch("/api/depth-chart", &json!({ "slot": 1 }))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_blank_refresh_token_is_rejected() {
        let server = MockServer::start().await;
        let (client, csrf, _) = client_for(&server);

        Mock::given(method("GET"))
            .and(path("/auth/csrf-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "" })))
            .mount(&server)
            .await;

        let result = client.refresh_csrf_token().await;
        match result {
            Err(ClientError::CsrfRefresh(inner)) => {
                assert!(matches!(*inner, ClientError::MissingCsrfToken));
            }
            other => panic!("expected missing token error, got {:?}", other),
        }
        assert!(csrf.is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_propagates_without_redirect() {
        let config = ClientConfig::with_base_url("http://127.0.0.1:9").unwrap();
        let navigator = Arc::new(MemoryNavigator::new());
        let client = ApiClient::new(config, CsrfTokenCache::new(), navigator.clone()).unwrap();

        let result: ClientResult<Value> = client.get("/auth/me").await;

        assert!(matches!(result, Err(ClientError::Transport(_))));
        assert_eq!(navigator.redirect_count(), 0);
    }
}
