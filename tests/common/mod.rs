//! Common test utilities for ui5rt integration tests
//!
//! [`TestServer`] is a local stand-in for the SAP download infrastructure: it
//! serves a version manifest and runtime archives from memory and records
//! every request it receives. [`serve_truncated`] answers a single request
//! with a body cut short of its declared length.

// Not every helper is used by every test file
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use ui5rt_cli::config::Endpoints;

pub const MANIFEST_PATH: &str = "/version.json";
pub const FILES_PREFIX: &str = "/files/";

/// A request as seen by the test server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub cookie: Option<String>,
    pub proxy_authorization: Option<String>,
}

#[derive(Default)]
struct ServerState {
    manifest: Mutex<Option<String>>,
    archives: Mutex<HashMap<String, Vec<u8>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    reject_head: AtomicBool,
}

/// Local HTTP server bound to `127.0.0.1:0`.
pub struct TestServer {
    addr: SocketAddr,
    state: Arc<ServerState>,
    _handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let state = Arc::new(ServerState::default());
        let app = Router::new().fallback(handle).with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            _handle: handle,
        }
    }

    /// Address to use when the server should act as an HTTP proxy.
    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    pub fn manifest_url(&self) -> String {
        format!("http://{}{}", self.addr, MANIFEST_PATH)
    }

    pub fn download_base(&self) -> String {
        format!("http://{}{}", self.addr, FILES_PREFIX)
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(self.manifest_url(), self.download_base())
    }

    pub fn archive_url(&self, version: &str) -> String {
        format!("{}sapui5-rt-{version}.zip", self.download_base())
    }

    /// Serve `body` as the version manifest.
    pub fn set_manifest(&self, body: impl Into<String>) {
        *self.state.manifest.lock().unwrap() = Some(body.into());
    }

    /// Serve `bytes` as the archive for `version`.
    pub fn add_archive(&self, version: &str, bytes: Vec<u8>) {
        self.state.archives.lock().unwrap().insert(format!("sapui5-rt-{version}.zip"), bytes);
    }

    /// Answer HEAD requests with 405 so clients must fall back to GET.
    pub fn reject_head(&self) {
        self.state.reject_head.store(true, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }

    /// Archive file names in the order they were requested with `method`.
    pub fn archive_requests(&self, method: Method) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .filter_map(|r| r.path.strip_prefix(FILES_PREFIX).map(str::to_string))
            .collect()
    }
}

async fn handle(
    State(state): State<Arc<ServerState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let path = uri.path().to_string();
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        cookie: header_value(&headers, header::COOKIE),
        proxy_authorization: header_value(&headers, header::PROXY_AUTHORIZATION),
    });

    if path == MANIFEST_PATH {
        return match state.manifest.lock().unwrap().clone() {
            Some(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
            None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        };
    }

    let Some(file_name) = path.strip_prefix(FILES_PREFIX) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if method == Method::HEAD && state.reject_head.load(Ordering::SeqCst) {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let Some(bytes) = state.archives.lock().unwrap().get(file_name).cloned() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let body = if method == Method::HEAD {
        Body::empty()
    } else {
        Body::from(bytes)
    };
    (StatusCode::OK, [(header::CONTENT_TYPE, "application/zip")], body).into_response()
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
}

/// Accept one connection and answer it with a `Content-Length` of
/// `declared_len` but only `body` before closing.
///
/// Returns a download base URL; any archive name under it hits this response.
pub async fn serve_truncated(body: Vec<u8>, declared_len: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let read = socket.read(&mut buf).await.unwrap();
            if read == 0 {
                return;
            }
            request.extend_from_slice(&buf[..read]);
        }

        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/zip\r\nContent-Length: {declared_len}\r\n\r\n"
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(&body).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    format!("http://{addr}{FILES_PREFIX}")
}
