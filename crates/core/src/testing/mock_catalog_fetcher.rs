//! Mock catalog fetcher for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::catalog::{Book, CatalogFetcher, FetchError};

/// Mock implementation of the CatalogFetcher trait.
///
/// Provides controllable behavior for testing:
/// - Return a configurable book list
/// - Count fetches for assertions
/// - Simulate failures and slow fetches
///
/// # Example
///
/// ```rust,ignore
/// use bookshelf_core::testing::{MockCatalogFetcher, fixtures};
///
/// let fetcher = MockCatalogFetcher::new();
/// fetcher.set_books(fixtures::books(&[("Dune", 10)])).await;
///
/// let books = fetcher.fetch().await?;
/// assert_eq!(books.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockCatalogFetcher {
    /// Books returned by every successful fetch.
    books: Arc<RwLock<Vec<Book>>>,
    /// Number of fetches performed, including failed ones.
    fetch_count: Arc<RwLock<usize>>,
    /// If set, the next fetch will fail with this error.
    next_error: Arc<RwLock<Option<FetchError>>>,
    /// If set, every fetch fails with this error until cleared.
    persistent_error: Arc<RwLock<Option<FetchError>>>,
    /// Simulated network latency.
    fetch_delay: Arc<RwLock<Duration>>,
}

impl MockCatalogFetcher {
    /// Create a new mock that returns an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that returns the given books.
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: Arc::new(RwLock::new(books)),
            ..Self::default()
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Replace the books returned by subsequent fetches.
    pub async fn set_books(&self, books: Vec<Book>) {
        *self.books.write().await = books;
    }

    /// Set the simulated latency of each fetch.
    pub async fn set_fetch_delay(&self, delay: Duration) {
        *self.fetch_delay.write().await = delay;
    }

    // =========================================================================
    // Fetch Recording
    // =========================================================================

    /// Get the number of fetches performed.
    pub async fn fetch_count(&self) -> usize {
        *self.fetch_count.read().await
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next fetch to fail with the given error.
    pub async fn set_next_error(&self, error: FetchError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make every fetch fail with the given error until cleared.
    pub async fn set_persistent_error(&self, error: FetchError) {
        *self.persistent_error.write().await = Some(error);
    }

    /// Clear any pending or persistent error.
    pub async fn clear_errors(&self) {
        *self.next_error.write().await = None;
        *self.persistent_error.write().await = None;
    }

    async fn take_error(&self) -> Option<FetchError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Some(err);
        }
        self.persistent_error.read().await.clone()
    }
}

#[async_trait]
impl CatalogFetcher for MockCatalogFetcher {
    async fn fetch(&self) -> Result<Vec<Book>, FetchError> {
        *self.fetch_count.write().await += 1;

        let delay = *self.fetch_delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        Ok(self.books.read().await.clone())
    }
}
