//! Mock backend setup shared by the integration tests.

#![allow(dead_code)]

use mockito::{Matcher, Mock, Server, ServerGuard};
use physio_client::session::{MemoryStore, RecordingNavigator};
use physio_client::{ApiClient, ApiClientBuilder, ClientConfig, Credentials, RetryConfig};
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Mock server plus a client pointed at it.
pub struct MockBackend {
    pub server: ServerGuard,
    pub store: Arc<MemoryStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub client: ApiClient,
}

impl MockBackend {
    /// Client with no stored tokens.
    pub async fn new() -> Self {
        Self::with_credentials(Credentials::default()).await
    }

    /// Client whose store already holds `credentials`.
    pub async fn with_credentials(credentials: Credentials) -> Self {
        let server = Server::new_async().await;
        let store = Arc::new(MemoryStore::with_credentials(credentials));
        let navigator = Arc::new(RecordingNavigator::new());
        let client = client_for(format!("{}/api", server.url()), &store, &navigator);
        Self {
            server,
            store,
            navigator,
            client,
        }
    }

    /// Logged-in client holding `abc` / `xyz`.
    pub async fn logged_in() -> Self {
        Self::with_credentials(Credentials::new("abc", Some("xyz".to_string()))).await
    }

    /// JSON mock for `method path` (path relative to `/api`). Not yet
    /// registered; finish with `.create_async().await`.
    pub fn json(&mut self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock(method, format!("/api{}", path).as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
    }

    /// Like [`json`](Self::json) but only for requests carrying `Token <token>`.
    pub fn json_for_token(
        &mut self,
        method: &str,
        path: &str,
        token: &str,
        status: usize,
        body: &str,
    ) -> Mock {
        self.server
            .mock(method, format!("/api{}", path).as_str())
            .match_header("authorization", format!("Token {}", token).as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
    }

    /// `POST /api/auth/refresh/` expecting `{"refresh": refresh}`.
    pub fn refresh(&mut self, refresh: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock("POST", "/api/auth/refresh/")
            .match_body(Matcher::Json(serde_json::json!({ "refresh": refresh })))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
    }

    pub fn stored(&self) -> Credentials {
        use physio_client::CredentialStore;
        self.store.load().expect("memory store loads")
    }
}

/// Default policy shape (two retries, linear) with a short step.
pub fn fast_retry() -> RetryConfig {
    RetryConfig {
        max_network_retries: 2,
        backoff_step_ms: 10,
    }
}

/// Client against `base_url` backed by `store` and `navigator`.
pub fn client_for(
    base_url: String,
    store: &Arc<MemoryStore>,
    navigator: &Arc<RecordingNavigator>,
) -> ApiClient {
    ApiClientBuilder::with_config(ClientConfig::default())
        .base_url(base_url)
        .retry(fast_retry())
        .credential_store(store.clone())
        .navigator(navigator.clone())
        .build()
        .expect("client builds")
}

/// One request as received by [`gated_backend`].
#[derive(Debug, Clone, PartialEq)]
pub struct Received {
    pub method: String,
    /// Path without the query string, `/api` prefix included.
    pub path: String,
    pub authorization: Option<String>,
}

/// Minimal HTTP/1.1 backend whose handler may hold a reply until the test
/// releases it. Every connection carries one request and is closed after the
/// reply. Returns the `/api` base URL and the log of received requests.
pub async fn gated_backend<H, Fut>(handler: H) -> (String, Arc<Mutex<Vec<Received>>>)
where
    H: Fn(Received) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let received = Arc::new(Mutex::new(Vec::new()));
    let log = received.clone();
    let handler = Arc::new(handler);
    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                return;
            };
            let handler = handler.clone();
            let log = log.clone();
            tokio::spawn(async move {
                let Some((request, mut socket)) = read_request(socket).await else {
                    return;
                };
                log.lock().unwrap().push(request.clone());
                let (status, body) = (*handler)(request).await;
                let reply = format!(
                    "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    if status < 400 { "OK" } else { "Error" },
                    body.len(),
                    body
                );
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });
    (format!("http://{}/api", addr), received)
}

async fn read_request(mut socket: TcpStream) -> Option<(Received, TcpStream)> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let head_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?;
    let path = target.split('?').next().unwrap_or(target).to_string();

    let mut authorization = None;
    let mut content_length = 0usize;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if name.eq_ignore_ascii_case("authorization") {
            authorization = Some(value.to_string());
        } else if name.eq_ignore_ascii_case("content-length") {
            content_length = value.parse().unwrap_or(0);
        }
    }

    let mut body_read = buf.len() - head_end;
    while body_read < content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body_read += n;
    }

    Some((
        Received {
            method,
            path,
            authorization,
        },
        socket,
    ))
}
