//! Common test utilities for API testing with mocks.
//!
//! This module provides a test fixture that builds the router in-process
//! with a mock catalog fetcher behind the shelf, so API tests run without
//! any network access.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use bookshelf_core::{testing::MockCatalogFetcher, BookShelf, CatalogFetcher, Config};
use bookshelf_server::state::AppState;

/// Re-export fixtures for test convenience
pub use bookshelf_core::testing::fixtures;

/// Test fixture for API testing with a mock fetcher.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_refresh() {
///     let fixture = TestFixture::new();
///     fixture.fetcher.set_books(fixtures::gutenberg_sample()).await;
///
///     let response = fixture.post("/api/v1/books/refresh", Value::Null).await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock fetcher - configure the catalog and injected errors
    pub fetcher: Arc<MockCatalogFetcher>,
    /// The shelf behind the router
    pub shelf: Arc<BookShelf>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture with an empty shelf.
    pub fn new() -> Self {
        let fetcher = Arc::new(MockCatalogFetcher::new());
        let shelf = Arc::new(BookShelf::new(
            Arc::clone(&fetcher) as Arc<dyn CatalogFetcher>
        ));

        let mut config = Config::default();
        config.server.refresh_on_start = false;

        let state = Arc::new(AppState::new(config, Arc::clone(&shelf)));
        let router = bookshelf_server::api::create_router(state);

        Self {
            router,
            fetcher,
            shelf,
        }
    }

    /// Create a fixture whose shelf already holds the given books.
    pub async fn with_books(entries: &[(&str, u64)]) -> Self {
        let fixture = Self::new();
        fixture.fetcher.set_books(fixtures::books(entries)).await;
        fixture.shelf.refresh().await;
        fixture
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request, with a JSON body unless `body` is null.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        let body = (!body.is_null()).then_some(body);
        self.request("POST", path, body).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Send a request and return the raw text body.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
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

/// Helper to assert a JSON path equals expected value.
#[macro_export]
macro_rules! assert_json_path {
    ($json:expr, $path:expr, $expected:expr) => {
        let actual = &$json[$path];
        assert_eq!(
            actual, &$expected,
            "Path '{}' expected {:?}, got {:?}",
            $path, $expected, actual
        );
    };
}
