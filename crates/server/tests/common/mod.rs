//! Common test utilities for in-process endpoint testing.
//!
//! The fixture builds the full axum router over a fresh in-memory store,
//! so tests exercise body decoding, CORS and dispatch without a socket.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use ticketdesk_core::{Config, MemoryTicketStore, TicketStore};
use ticketdesk_server::{api::create_router, state::AppState};

/// Test fixture wrapping an in-process router.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_list() {
///     let fixture = TestFixture::new();
///     let response = fixture.get("/?method=allTickets").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// The store behind the router, for direct assertions
    pub store: Arc<MemoryTicketStore>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture over a store seeded with the example tickets.
    pub fn new() -> Self {
        Self::with_store(MemoryTicketStore::seeded())
    }

    /// Create a fixture over an empty store.
    pub fn empty() -> Self {
        Self::with_store(MemoryTicketStore::new())
    }

    fn with_store(store: MemoryTicketStore) -> Self {
        let store = Arc::new(store);
        let state = Arc::new(AppState::new(
            Config::default(),
            Arc::clone(&store) as Arc<dyn TicketStore>,
        ));

        Self {
            router: create_router(state),
            store,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request with raw string body and custom content type.
    pub async fn post_with_content_type(
        &self,
        path: &str,
        body: &str,
        content_type: &str,
    ) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", content_type)
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send a request with JSON body.
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        self.send(request_builder.body(body).unwrap()).await
    }

    /// Send a fully built request.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body_bytes).into_owned()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
