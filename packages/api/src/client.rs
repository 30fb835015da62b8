//! # Authenticated request pipeline
//!
//! [`ApiClient`] decorates every outbound call to the backend and polices
//! the credential's validity. It is generic over the session store's vault,
//! so the full pipeline — including the invalidation side effects — runs
//! unchanged in tests against an in-memory vault and a recording
//! [`Navigator`].
//!
//! ## Request phase
//!
//! Before dispatch the pipeline reads the store's token. If present it is
//! attached as `Authorization: Bearer <token>`; if absent the request goes
//! out unauthenticated and the backend decides whether the endpoint needed
//! one.
//!
//! ## Response phase
//!
//! | Status | Handling |
//! |--------|----------|
//! | 2xx | Body parsed into the declared type; a schema mismatch is [`ApiError::Decode`]. |
//! | 401 / 403 | Invalidation protocol: clear the session (erasing the durable slot) and force navigation to the login page, then fail with [`ApiError::Unauthorized`]. 403 is deliberately treated like 401 — the backend uses it for stale role grants, so a forbidden answer means the session is no longer worth keeping. |
//! | other 4xx/5xx | [`ApiError::Status`] passthrough; no session side effects. |
//!
//! Concurrent requests failing together collapse to a single invalidation:
//! the latch admits one clear-and-redirect until the next successful login.
//!
//! ## Retry
//!
//! Network errors and 5xx responses are retried per the configured
//! [`RetryPolicy`](crate::RetryPolicy) with exponential backoff; 4xx
//! responses are final. The default policy performs no retries.
//!
//! ## Auth endpoints
//!
//! [`login`](ApiClient::login) and [`register`](ApiClient::register) bypass
//! both bearer attachment and the invalidation protocol: a rejected login
//! must surface inline next to the form, not bounce the user around. The
//! store is updated only after the response parsed cleanly, so a failure
//! never leaves it half-written.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use store::{AuthRole, Session, SessionStore, SessionVault};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::navigate::{BrowserNavigator, Navigator, LOGIN_PATH};
use crate::types::{AuthResponse, ErrorBody, LoginRequest, RegisterRequest};

const LOGIN_FAILED: &str = "Login failed";
const REGISTER_FAILED: &str = "Registration failed";

async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// REST client bound to a session store. Clones share the store and the
/// invalidation latch.
pub struct ApiClient<V> {
    http: reqwest::Client,
    config: ApiConfig,
    session: SessionStore<V>,
    navigator: Arc<dyn Navigator>,
    invalidating: Arc<AtomicBool>,
}

impl<V: Clone> Clone for ApiClient<V> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            config: self.config.clone(),
            session: self.session.clone(),
            navigator: Arc::clone(&self.navigator),
            invalidating: Arc::clone(&self.invalidating),
        }
    }
}

impl<V: SessionVault + Clone> ApiClient<V> {
    /// Client navigating via the browser on forced redirects.
    pub fn new(config: ApiConfig, session: SessionStore<V>) -> Self {
        Self::with_navigator(config, session, Arc::new(BrowserNavigator))
    }

    /// Client with an injected [`Navigator`], for tests and embedding.
    pub fn with_navigator(
        config: ApiConfig,
        session: SessionStore<V>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            session,
            navigator,
            invalidating: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The session store this client reads its credential from.
    pub fn session(&self) -> &SessionStore<V> {
        &self.session
    }

    /// GET `path`, parsing the response as `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<(), T>(Method::GET, path, None).await
    }

    /// POST `body` to `path`, parsing the response as `T`.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    /// PUT `body` to `path`, parsing the response as `T`.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// DELETE `path`, parsing the response as `T`.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<(), T>(Method::DELETE, path, None).await
    }

    /// Authenticate against `POST /auth/login` and, on success, apply the
    /// returned identity/token pair to the session store.
    ///
    /// On any failure the store is left exactly as it was and the error
    /// carries the backend's message when one was given.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        self.session.set_loading(true);
        let result = self
            .auth_request(
                "/auth/login",
                &LoginRequest { email, password },
                LOGIN_FAILED,
            )
            .await;
        self.session.set_loading(false);
        result
    }

    /// Create an account via `POST /auth/register`; same contract as
    /// [`login`](ApiClient::login). The caller-supplied role tag is
    /// normalized (trimmed, case-folded) and checked against the closed
    /// role set before anything is sent.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: &str,
    ) -> Result<Session, ApiError> {
        let role: AuthRole = role
            .parse()
            .map_err(|err: store::UnknownRole| ApiError::Auth {
                reason: err.to_string(),
            })?;

        self.session.set_loading(true);
        let result = self
            .auth_request(
                "/auth/register",
                &RegisterRequest {
                    email,
                    password,
                    name,
                    role,
                },
                REGISTER_FAILED,
            )
            .await;
        self.session.set_loading(false);
        result
    }

    /// Clear the session, erase the durable slot, and send the user to the
    /// login page. Never fails.
    pub async fn logout(&self) {
        self.session.clear().await;
        self.navigator.navigate(LOGIN_PATH);
    }

    async fn auth_request<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        generic_reason: &str,
    ) -> Result<Session, ApiError> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|err| {
                tracing::error!("POST {path} failed: {err}");
                ApiError::Auth {
                    reason: generic_reason.to_string(),
                }
            })?;

        let status = response.status();
        if status.is_success() {
            let bytes = response.bytes().await.map_err(|err| {
                tracing::error!("POST {path} body read failed: {err}");
                ApiError::Auth {
                    reason: generic_reason.to_string(),
                }
            })?;
            let auth: AuthResponse = serde_json::from_slice(&bytes)?;
            tracing::debug!("POST {path} succeeded for {}", auth.user.email);
            let session = self.session.apply_login(auth.user, auth.access_token).await;
            // A fresh credential re-arms the invalidation protocol.
            self.invalidating.store(false, Ordering::SeqCst);
            Ok(session)
        } else {
            let reason = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| generic_reason.to_string());
            tracing::debug!("POST {path} rejected ({status}): {reason}");
            Err(ApiError::Auth { reason })
        }
    }

    async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let mut attempt = 0u32;
        loop {
            let mut builder = self.http.request(method.clone(), &url);
            if let Some(token) = self.session.token() {
                builder = builder.bearer_auth(token);
            }
            if let Some(body) = body {
                builder = builder.json(body);
            }

            tracing::debug!("{method} {path}");
            match builder.send().await {
                Err(err) => {
                    if attempt < self.config.retry.max_retries {
                        tracing::warn!("{method} {path} failed ({err}), retrying");
                        sleep(self.config.retry.delay_for(attempt)).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(ApiError::Transport(err));
                }
                Ok(response) => {
                    let status = response.status();
                    if status.is_server_error() && attempt < self.config.retry.max_retries {
                        tracing::warn!("{method} {path} returned {status}, retrying");
                        sleep(self.config.retry.delay_for(attempt)).await;
                        attempt += 1;
                        continue;
                    }
                    return self.conclude(&method, path, response).await;
                }
            }
        }
    }

    async fn conclude<T: DeserializeOwned>(
        &self,
        method: &Method,
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            let bytes = response.bytes().await?;
            return Ok(serde_json::from_slice(&bytes)?);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::error!("{method} {path} rejected with {status}, invalidating session");
            self.invalidate().await;
            return Err(ApiError::Unauthorized {
                status: status.as_u16(),
            });
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);
        tracing::debug!("{method} {path} returned {status}");
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// The clear-and-redirect sequence. The latch collapses concurrent
    /// authorization failures into one net effect; it re-arms on the next
    /// successful login.
    async fn invalidate(&self) {
        if self.invalidating.swap(true, Ordering::SeqCst) {
            tracing::debug!("invalidation already in progress");
            return;
        }
        self.session.clear().await;
        self.navigator.navigate(LOGIN_PATH);
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryPolicy;
    use crate::types::Product;
    use axum::extract::State;
    use axum::http::HeaderMap;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde::Deserialize;
    use serde_json::{json, Value};
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use store::{AuthUser, MemoryVault, SessionStore};

    #[derive(Clone, Default)]
    struct RecordingNavigator {
        paths: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingNavigator {
        fn recorded(&self) -> Vec<String> {
            self.paths.lock().unwrap().clone()
        }
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, path: &str) {
            self.paths.lock().unwrap().push(path.to_string());
        }
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client_for(
        base_url: String,
    ) -> (ApiClient<MemoryVault>, MemoryVault, RecordingNavigator) {
        let vault = MemoryVault::new();
        let session = SessionStore::new(vault.clone());
        let navigator = RecordingNavigator::default();
        let client = ApiClient::with_navigator(
            ApiConfig::new(base_url),
            session,
            Arc::new(navigator.clone()),
        );
        (client, vault, navigator)
    }

    fn user_json() -> Value {
        json!({
            "id": "u1",
            "email": "buyer@example.com",
            "name": "Buyer",
            "role": "BUYER",
        })
    }

    fn seeded_user() -> AuthUser {
        AuthUser {
            id: "u1".to_string(),
            email: "buyer@example.com".to_string(),
            name: "Buyer".to_string(),
            role: AuthRole::Buyer,
        }
    }

    async fn login_ok(Json(_body): Json<Value>) -> Json<Value> {
        Json(json!({"user": user_json(), "accessToken": "tok123"}))
    }

    #[tokio::test]
    async fn login_success_populates_session() {
        let app = Router::new().route("/auth/login", post(login_ok));
        let (client, vault, navigator) = client_for(serve(app).await);

        let session = client
            .login("buyer@example.com", "hunter2")
            .await
            .unwrap();

        assert_eq!(session.token.as_deref(), Some("tok123"));
        assert_eq!(session.user.as_ref().unwrap().role, AuthRole::Buyer);
        assert!(session.hydrated);
        assert!(!session.loading);
        assert!(vault.load().await.is_some());
        assert!(navigator.recorded().is_empty());
    }

    #[tokio::test]
    async fn failed_login_leaves_prior_session_untouched() {
        async fn reject(Json(_body): Json<Value>) -> (axum::http::StatusCode, Json<Value>) {
            (
                axum::http::StatusCode::UNAUTHORIZED,
                Json(json!({"message": "Invalid credentials"})),
            )
        }
        let app = Router::new().route("/auth/login", post(reject));
        let (client, _vault, navigator) = client_for(serve(app).await);

        client
            .session()
            .apply_login(seeded_user(), "prior".to_string())
            .await;
        let before = client.session().snapshot();

        let err = client
            .login("buyer@example.com", "wrong")
            .await
            .unwrap_err();

        match err {
            ApiError::Auth { reason } => assert_eq!(reason, "Invalid credentials"),
            other => panic!("expected Auth, got {other:?}"),
        }
        let after = client.session().snapshot();
        assert_eq!(after.user, before.user);
        assert_eq!(after.token, before.token);
        // A rejected login never triggers the redirect protocol.
        assert!(navigator.recorded().is_empty());
    }

    #[tokio::test]
    async fn login_failure_without_message_uses_generic_reason() {
        async fn reject(Json(_body): Json<Value>) -> (axum::http::StatusCode, Json<Value>) {
            (axum::http::StatusCode::BAD_GATEWAY, Json(json!({})))
        }
        let app = Router::new().route("/auth/login", post(reject));
        let (client, _, _) = client_for(serve(app).await);

        let err = client.login("buyer@example.com", "pw").await.unwrap_err();
        match err {
            ApiError::Auth { reason } => assert_eq!(reason, "Login failed"),
            other => panic!("expected Auth, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn register_sends_normalized_role() {
        type Captured = Arc<Mutex<Option<Value>>>;
        async fn capture(
            State(captured): State<Captured>,
            Json(body): Json<Value>,
        ) -> Json<Value> {
            *captured.lock().unwrap() = Some(body);
            Json(json!({
                "user": {
                    "id": "u2",
                    "email": "s@example.com",
                    "name": "S",
                    "role": "SELLER",
                },
                "accessToken": "tok456",
            }))
        }

        let captured: Captured = Arc::default();
        let app = Router::new()
            .route("/auth/register", post(capture))
            .with_state(Arc::clone(&captured));
        let (client, _, _) = client_for(serve(app).await);

        let session = client
            .register("s@example.com", "hunter22", "S", "  seller ")
            .await
            .unwrap();

        assert_eq!(session.user.unwrap().role, AuthRole::Seller);
        let sent = captured.lock().unwrap().clone().unwrap();
        assert_eq!(sent["role"], "SELLER");
    }

    #[tokio::test]
    async fn register_rejects_unknown_role_before_sending() {
        // Unroutable base URL: the request must never go out.
        let (client, _, _) = client_for("http://127.0.0.1:1".to_string());

        let err = client
            .register("s@example.com", "hunter22", "S", "wizard")
            .await
            .unwrap_err();

        match err {
            ApiError::Auth { reason } => assert!(reason.contains("WIZARD")),
            other => panic!("expected Auth, got {other:?}"),
        }
        assert!(client.session().user().is_none());
    }

    #[derive(Debug, Deserialize)]
    struct EchoAuth {
        authorization: Option<String>,
    }

    async fn echo_auth(headers: HeaderMap) -> Json<Value> {
        let auth = headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        Json(json!({"authorization": auth}))
    }

    #[tokio::test]
    async fn bearer_token_attached_when_present() {
        let app = Router::new()
            .route("/auth/login", post(login_ok))
            .route("/echo", get(echo_auth));
        let (client, _, _) = client_for(serve(app).await);

        let echoed: EchoAuth = client.get("/echo").await.unwrap();
        assert_eq!(echoed.authorization, None);

        client.login("buyer@example.com", "hunter2").await.unwrap();
        let echoed: EchoAuth = client.get("/echo").await.unwrap();
        assert_eq!(echoed.authorization.as_deref(), Some("Bearer tok123"));
    }

    async fn unauthorized() -> (axum::http::StatusCode, Json<Value>) {
        (
            axum::http::StatusCode::UNAUTHORIZED,
            Json(json!({"message": "token expired"})),
        )
    }

    async fn forbidden() -> (axum::http::StatusCode, Json<Value>) {
        (
            axum::http::StatusCode::FORBIDDEN,
            Json(json!({"message": "insufficient privilege"})),
        )
    }

    #[tokio::test]
    async fn unauthorized_response_runs_invalidation_protocol() {
        let app = Router::new()
            .route("/auth/login", post(login_ok))
            .route("/orders", get(unauthorized));
        let (client, vault, navigator) = client_for(serve(app).await);
        client.login("buyer@example.com", "hunter2").await.unwrap();

        let err = client.get::<Value>("/orders").await.unwrap_err();

        match err {
            ApiError::Unauthorized { status } => assert_eq!(status, 401),
            other => panic!("expected Unauthorized, got {other:?}"),
        }
        let session = client.session().snapshot();
        assert!(session.user.is_none());
        assert!(session.token.is_none());
        assert!(vault.load().await.is_none());
        assert_eq!(navigator.recorded(), vec![LOGIN_PATH.to_string()]);
    }

    #[tokio::test]
    async fn unauthenticated_call_still_redirects_on_401() {
        let app = Router::new().route("/orders", get(unauthorized));
        let (client, vault, navigator) = client_for(serve(app).await);

        let err = client.get::<Value>("/orders").await.unwrap_err();

        assert!(err.is_unauthorized());
        assert!(client.session().user().is_none());
        assert!(vault.load().await.is_none());
        assert_eq!(navigator.recorded(), vec![LOGIN_PATH.to_string()]);
    }

    #[tokio::test]
    async fn concurrent_forbidden_responses_invalidate_once() {
        let app = Router::new()
            .route("/auth/login", post(login_ok))
            .route("/admin", get(forbidden));
        let (client, _, navigator) = client_for(serve(app).await);
        client.login("buyer@example.com", "hunter2").await.unwrap();

        let (first, second) = futures::join!(
            client.get::<Value>("/admin"),
            client.get::<Value>("/admin"),
        );

        assert!(first.unwrap_err().is_unauthorized());
        assert!(second.unwrap_err().is_unauthorized());
        assert!(client.session().user().is_none());
        // Both failures collapsed into one forced navigation.
        assert_eq!(navigator.recorded(), vec![LOGIN_PATH.to_string()]);
    }

    #[tokio::test]
    async fn successful_login_rearms_invalidation() {
        let app = Router::new()
            .route("/auth/login", post(login_ok))
            .route("/orders", get(unauthorized));
        let (client, _, navigator) = client_for(serve(app).await);

        let _ = client.get::<Value>("/orders").await;
        assert_eq!(navigator.recorded().len(), 1);

        client.login("buyer@example.com", "hunter2").await.unwrap();
        let _ = client.get::<Value>("/orders").await;
        assert_eq!(navigator.recorded().len(), 2);
    }

    #[tokio::test]
    async fn other_statuses_pass_through_without_side_effects() {
        async fn missing() -> (axum::http::StatusCode, Json<Value>) {
            (
                axum::http::StatusCode::NOT_FOUND,
                Json(json!({"message": "no such product"})),
            )
        }
        let app = Router::new()
            .route("/auth/login", post(login_ok))
            .route("/products/p9", get(missing));
        let (client, _, navigator) = client_for(serve(app).await);
        client.login("buyer@example.com", "hunter2").await.unwrap();

        let err = client.get::<Product>("/products/p9").await.unwrap_err();

        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message.as_deref(), Some("no such product"));
            }
            other => panic!("expected Status, got {other:?}"),
        }
        assert!(client.session().user().is_some());
        assert!(navigator.recorded().is_empty());
    }

    #[tokio::test]
    async fn server_errors_are_retried_per_policy() {
        type Hits = Arc<AtomicUsize>;
        async fn flaky(State(hits): State<Hits>) -> (axum::http::StatusCode, Json<Value>) {
            let n = hits.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"message": "try again"})),
                )
            } else {
                (
                    axum::http::StatusCode::OK,
                    Json(json!([{"id": "p1", "name": "Compost Bin", "price": 19.5}])),
                )
            }
        }

        let hits: Hits = Arc::default();
        let app = Router::new()
            .route("/products", get(flaky))
            .with_state(Arc::clone(&hits));
        let base = serve(app).await;

        let vault = MemoryVault::new();
        let session = SessionStore::new(vault);
        let config = ApiConfig::new(base).with_retry(RetryPolicy {
            max_retries: 2,
            backoff: Duration::from_millis(1),
        });
        let client = ApiClient::with_navigator(
            config,
            session,
            Arc::new(RecordingNavigator::default()),
        );

        let products: Vec<Product> = client.get("/products").await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Compost Bin");
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhausted_retries_surface_the_status() {
        async fn broken() -> (axum::http::StatusCode, Json<Value>) {
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": "boom"})),
            )
        }
        let app = Router::new().route("/products", get(broken));
        let (client, _, navigator) = client_for(serve(app).await);

        let err = client.get::<Vec<Product>>("/products").await.unwrap_err();
        match err {
            ApiError::Status { status, .. } => assert_eq!(status, 500),
            other => panic!("expected Status, got {other:?}"),
        }
        assert!(navigator.recorded().is_empty());
    }

    #[tokio::test]
    async fn schema_mismatch_is_a_decode_error() {
        async fn wrong_shape() -> Json<Value> {
            Json(json!({"unexpected": true}))
        }
        let app = Router::new().route("/products", get(wrong_shape));
        let (client, _, _) = client_for(serve(app).await);

        let err = client.get::<Vec<Product>>("/products").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
