#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use studio_api::auth::session::SessionConfig;
use studio_api::config::{BackendConfig, ServerConfig};
use studio_api::router::build_app_router;
use studio_api::state::{AppState, MEDIA_ROUTE};
use studio_store::identity::{OperatorPassword, StaticIdentity};
use studio_store::objects::LocalObjectStorage;
use studio_store::upload::UploadClient;
use studio_store::{ContentFeed, ContentStore, MemoryStore};

pub const OPERATOR_EMAIL: &str = "owner@studio.test";
pub const OPERATOR_PASSWORD: &str = "correct horse battery";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(media_dir: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        session: SessionConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            expiry_mins: 60,
        },
        backends: BackendConfig {
            media_dir: media_dir.to_path_buf(),
            ..BackendConfig::default()
        },
    }
}

/// Content most tests start from.
pub fn seed_content() -> Value {
    json!({
        "admin": {
            "gallery": {
                "-G001": {
                    "title": "Beach wedding",
                    "category": "wedding",
                    "url": "https://cdn.test/g1.jpg",
                    "type": "image"
                },
                "-G002": {
                    "title": "Studio portrait",
                    "category": "portrait",
                    "url": "https://cdn.test/g2.jpg",
                    "type": "image"
                }
            },
            "projects": {
                "-P001": {
                    "title": "Product launch",
                    "category": "Commercial",
                    "client": "Acme",
                    "image": "https://cdn.test/p1.jpg"
                }
            },
            "services": {
                "-S001": {
                    "icon": "📸",
                    "title": "Wedding Photography",
                    "description": "Full-day coverage",
                    "price": "$500",
                    "features": ["Full day", "Album"]
                },
                "-S002": {
                    "icon": "🎥",
                    "title": "Event Videography",
                    "description": "Highlights film",
                    "price": "$300",
                    "features": ["4K"]
                }
            },
            "profile": {
                "username": "owner",
                "email": "hello@studio.test",
                "phone": "0700000001",
                "studioName": "Lens Studio",
                "address": "Kigali",
                "description": "We shoot stories."
            }
        }
    })
}

/// A running application wired to in-process collaborators.
pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
    pub state: AppState,
    /// Stands in for the gallery upload endpoint.
    pub upload_server: MockServer,
    pub media_dir: TempDir,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Mount a successful upload endpoint response.
    pub async fn accept_uploads(&self, id: &str, url: &str) {
        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": id, "url": url })))
            .mount(&self.upload_server)
            .await;
    }

    /// Log in as the configured operator and return the bearer token.
    pub async fn token(&self) -> String {
        let body = json!({ "email": OPERATOR_EMAIL, "password": OPERATOR_PASSWORD });
        let response = post_json(self.app(), "/api/v1/auth/login", body).await;
        assert_eq!(response.status(), 200, "operator login should succeed");
        let json = body_json(response).await;
        json["data"]["token"]
            .as_str()
            .expect("login response carries a token")
            .to_string()
    }
}

/// Build the full application over a [`MemoryStore`] holding `seed`.
///
/// Uses the same router builder as `main.rs` so tests exercise the
/// production middleware stack.
pub async fn build_test_app(seed: Value) -> TestApp {
    let store = MemoryStore::with_data(seed);
    let shared: Arc<dyn ContentStore> = Arc::new(store.clone());
    build_test_app_over(store, shared).await
}

/// Like [`build_test_app`], but handlers talk to `shared`, which may wrap
/// `store` to inject failures.
pub async fn build_test_app_over(store: MemoryStore, shared: Arc<dyn ContentStore>) -> TestApp {
    let media_dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(media_dir.path());
    let upload_server = MockServer::start().await;

    let feed = ContentFeed::start(Arc::clone(&shared))
        .await
        .expect("feed starts over the memory store");

    let password = OperatorPassword::hash(OPERATOR_PASSWORD).expect("hashing should succeed");

    let state = AppState {
        config: Arc::new(config.clone()),
        store: shared,
        feed: Arc::new(feed),
        objects: Arc::new(LocalObjectStorage::new(media_dir.path(), MEDIA_ROUTE)),
        identity: Arc::new(StaticIdentity::new(OPERATOR_EMAIL, password)),
        uploader: Arc::new(UploadClient::new(format!("{}/upload", upload_server.uri()))),
        started_at: Instant::now(),
        shutdown: CancellationToken::new(),
    };

    let router = build_app_router(state.clone(), &config).expect("router builds");

    TestApp {
        router,
        store,
        state,
        upload_server,
        media_dir,
    }
}

/// Serve `app` on an ephemeral local port and return its address.
pub async fn serve(app: &TestApp) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().unwrap();
    let router = app.app();
    let shutdown = app.state.shutdown.clone();
    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await
            .unwrap();
    });
    addr
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    json_request(app, Method::POST, uri, None, body).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    json_request(app, Method::POST, uri, Some(token), body).await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    json_request(app, Method::PUT, uri, Some(token), body).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    send(app, request).await
}

pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    token: &str,
    form: MultipartForm,
) -> Response<Body> {
    let (content_type, body) = form.finish();
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

// ---------------------------------------------------------------------------
// Multipart bodies
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "studio-test-boundary";

/// Minimal `multipart/form-data` body builder.
#[derive(Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        (format!("multipart/form-data; boundary={BOUNDARY}"), self.body)
    }
}

/// Smallest valid PNG header; enough for format sniffing.
pub const PNG_BYTES: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R',
];
