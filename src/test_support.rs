//! Fakes shared by unit tests.
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Bytes;
use axum::extract::Request;
use axum::http::{HeaderMap, StatusCode};
use url::Url;
use uuid::Uuid;

use crate::services::ServiceClient;
use crate::services::auth::{Identity, IdentityBackend, IdentityError};
use crate::services::upstream::{UpstreamClient, UpstreamError, UpstreamResponse};
use crate::state::AppState;

pub fn identity_fixture() -> Identity {
    Identity {
        id: Uuid::from_u128(0x7b1c5a0e_2f7e_4c89_9a59_3c6a8f2d1e11),
        aud: "authenticated".to_string(),
        role: "authenticated".to_string(),
        email: Some("ada@example.com".to_string()),
        phone: None,
        app_metadata: serde_json::json!({"provider": "email"}),
        user_metadata: serde_json::json!({}),
        created_at: None,
        last_sign_in_at: None,
    }
}

#[derive(Debug, Clone)]
enum Mode {
    Valid { token: String, identity: Identity },
    NoUser,
    Unreachable,
}

#[derive(Debug)]
struct Inner {
    mode: Mode,
    calls: AtomicUsize,
    tokens: Mutex<Vec<String>>,
}

/// Scriptable identity backend that records every token it is asked about.
#[derive(Debug, Clone)]
pub struct FakeIdentityBackend {
    inner: Arc<Inner>,
}

impl FakeIdentityBackend {
    fn with_mode(mode: Mode) -> Self {
        Self {
            inner: Arc::new(Inner {
                mode,
                calls: AtomicUsize::new(0),
                tokens: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Accepts exactly `token`; rejects every other token.
    pub fn valid(token: &str, identity: Identity) -> Self {
        Self::with_mode(Mode::Valid {
            token: token.to_string(),
            identity,
        })
    }

    pub fn no_user() -> Self {
        Self::with_mode(Mode::NoUser)
    }

    pub fn unreachable() -> Self {
        Self::with_mode(Mode::Unreachable)
    }

    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    pub fn tokens(&self) -> Vec<String> {
        self.inner.tokens.lock().unwrap().clone()
    }

    pub fn service_client(&self) -> ServiceClient {
        ServiceClient::new(Arc::new(self.clone()))
    }
}

#[async_trait]
impl IdentityBackend for FakeIdentityBackend {
    fn backend_name(&self) -> &'static str {
        "fake"
    }

    async fn get_user(&self, token: &str) -> Result<Option<Identity>, IdentityError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.tokens.lock().unwrap().push(token.to_string());

        match &self.inner.mode {
            Mode::Valid {
                token: accepted,
                identity,
            } if accepted == token => Ok(Some(identity.clone())),
            Mode::Valid { .. } => Err(IdentityError::Rejected {
                status: 401,
                message: "invalid JWT".to_string(),
            }),
            Mode::NoUser => Ok(None),
            Mode::Unreachable => Err(IdentityError::Transport("connection refused".to_string())),
        }
    }
}

/// Upstream that answers every GET with a canned status and body.
#[derive(Debug, Clone)]
pub struct StubUpstream {
    status: StatusCode,
    body: Bytes,
    calls: Arc<AtomicUsize>,
}

impl StubUpstream {
    pub fn ok(body: &'static str) -> Self {
        Self::with_status(StatusCode::OK, body)
    }

    pub fn with_status(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body: Bytes::from_static(body.as_bytes()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpstreamClient for StubUpstream {
    async fn get(&self, _url: &Url) -> Result<UpstreamResponse, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(UpstreamResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

pub fn test_state(backend: &FakeIdentityBackend, upstream: StubUpstream) -> AppState {
    let backend = backend.clone();
    AppState::new(
        Arc::new(move || backend.service_client()),
        Arc::new(upstream),
        Url::parse("https://upstream.test/api/breeds/image/random").unwrap(),
    )
}

/// A request as seen by [`RecordingServer`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HeaderMap,
}

/// Real HTTP server on an ephemeral local port that answers every request
/// with a canned status and body, and records what it received.
pub struct RecordingServer {
    pub url: Url,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl RecordingServer {
    pub async fn start(status: StatusCode, body: &'static str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = requests.clone();

        let app = Router::new().fallback(move |req: Request| {
            let seen = seen.clone();
            async move {
                seen.lock().unwrap().push(RecordedRequest {
                    method: req.method().to_string(),
                    path: req.uri().path().to_string(),
                    headers: req.headers().clone(),
                });
                (status, body)
            }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: Url::parse(&format!("http://{addr}")).unwrap(),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// URL of a local port nothing is listening on.
pub async fn closed_port_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}")).unwrap()
}

/// reqwest client for talking to [`RecordingServer`]; ignores proxy env vars.
pub fn local_http() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
