//! Retry behavior when the backend accepts connections but never answers.

mod common;

use common::fast_retry;
use physio_client::{ApiClientBuilder, ApiErrorKind, ClientConfig, RetryConfig};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;

/// Accepts connections, reads the request and hangs up without replying.
async fn dropping_backend() -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = accepted.clone();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            counter.fetch_add(1, Ordering::SeqCst);
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
        }
    });
    (format!("http://{}/api", addr), accepted)
}

#[tokio::test]
async fn test_three_attempts_then_network_error() {
    let (base_url, accepted) = dropping_backend().await;
    let client = ApiClientBuilder::with_config(ClientConfig::default())
        .base_url(base_url)
        .retry(fast_retry())
        .build()
        .unwrap();

    let started = Instant::now();
    let err = client.get::<Value>("/books/").await.unwrap_err();

    assert_eq!(err.api_kind(), Some(ApiErrorKind::NetworkError));
    assert_eq!(accepted.load(Ordering::SeqCst), 3);
    // 1x then 2x the 10ms step.
    assert!(started.elapsed() >= Duration::from_millis(30));
    let api = err.as_api().unwrap();
    assert!(api.status.is_none());
    assert!(api.message.contains("3 attempts"), "{}", api.message);
}

#[tokio::test]
async fn test_retries_cover_writes_too() {
    let (base_url, accepted) = dropping_backend().await;
    let client = ApiClientBuilder::with_config(ClientConfig::default())
        .base_url(base_url)
        .retry(fast_retry())
        .build()
        .unwrap();

    let err = client
        .post::<_, Value>("/appointments/", &serde_json::json!({"reason": "knee"}))
        .await
        .unwrap_err();

    assert_eq!(err.api_kind(), Some(ApiErrorKind::NetworkError));
    assert_eq!(accepted.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_zero_retries_fails_after_one_attempt() {
    let (base_url, accepted) = dropping_backend().await;
    let client = ApiClientBuilder::with_config(ClientConfig::default())
        .base_url(base_url)
        .retry(RetryConfig {
            max_network_retries: 0,
            backoff_step_ms: 10,
        })
        .build()
        .unwrap();

    let err = client.get::<Value>("/books/").await.unwrap_err();

    assert_eq!(err.api_kind(), Some(ApiErrorKind::NetworkError));
    assert_eq!(accepted.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_refused_connection_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClientBuilder::with_config(ClientConfig::default())
        .base_url(format!("http://{}/api", addr))
        .retry(fast_retry())
        .build()
        .unwrap();

    let err = client.users().me().await.unwrap_err();
    assert_eq!(err.api_kind(), Some(ApiErrorKind::NetworkError));
    assert!(!client.is_authenticated());
}
