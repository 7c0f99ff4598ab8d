//! The book shelf: current catalog snapshot plus the queries over it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::events::{ShelfBroadcaster, ShelfEvent};
use super::query;
use super::types::{HomeSummary, NavigationRequest, RefreshOutcome, SearchOutcome, ShelfSnapshot};
use crate::catalog::{Book, CatalogFetcher};
use crate::metrics::{CATALOG_BOOKS, CATALOG_FETCHES, CATALOG_FETCH_DURATION, REFRESHES_SUPERSEDED};

#[derive(Debug, Default)]
struct ShelfState {
    books: Arc<Vec<Book>>,
    message: Option<String>,
    search_query: String,
    last_refreshed_at: Option<DateTime<Utc>>,
    /// Generation of the refresh whose catalog is currently stored.
    applied_generation: u64,
}

/// Owns the current catalog and answers queries over it.
///
/// The catalog is replaced wholesale by [`BookShelf::refresh`]; every query
/// runs against an `Arc` snapshot taken under a short read lock, so queries
/// never observe a half-replaced catalog. The lock is never held across an
/// await point.
pub struct BookShelf {
    fetcher: Arc<dyn CatalogFetcher>,
    state: RwLock<ShelfState>,
    /// Bumped at the start of every refresh.
    generation: AtomicU64,
    events: ShelfBroadcaster,
}

impl BookShelf {
    /// Create an empty shelf populated by the given fetcher.
    pub fn new(fetcher: Arc<dyn CatalogFetcher>) -> Self {
        Self {
            fetcher,
            state: RwLock::new(ShelfState::default()),
            generation: AtomicU64::new(0),
            events: ShelfBroadcaster::default(),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ShelfState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ShelfState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // Refresh
    // =========================================================================

    /// Fetch the catalog and replace the stored one.
    ///
    /// On failure the previous catalog is kept and the error is turned into
    /// the current message. A result is dropped only when a refresh that
    /// started later has already stored its catalog.
    pub async fn refresh(&self) -> RefreshOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, "Refreshing catalog");

        let start = Instant::now();
        let result = self.fetcher.fetch().await;
        CATALOG_FETCH_DURATION.observe(start.elapsed().as_secs_f64());

        let mut events = Vec::new();
        let outcome = {
            let mut state = self.write();

            if state.applied_generation > generation {
                REFRESHES_SUPERSEDED.inc();
                debug!(generation, "Dropping superseded refresh result");
                return RefreshOutcome::Superseded;
            }

            match result {
                Ok(books) => {
                    CATALOG_FETCHES.with_label_values(&["success"]).inc();
                    let count = books.len();
                    state.books = Arc::new(books);
                    state.applied_generation = generation;
                    state.last_refreshed_at = Some(Utc::now());
                    events.push(ShelfEvent::CatalogReplaced { count });
                    if state.message.take().is_some() {
                        events.push(ShelfEvent::MessageChanged { message: None });
                    }
                    CATALOG_BOOKS.set(count as i64);
                    info!(count, "Catalog replaced");
                    RefreshOutcome::Updated { count }
                }
                Err(e) => {
                    let kind = e.kind();
                    CATALOG_FETCHES.with_label_values(&[kind.as_str()]).inc();
                    let message = e.display_message();
                    warn!(kind = kind.as_str(), error = %e, "Catalog refresh failed");
                    state.message = Some(message.clone());
                    events.push(ShelfEvent::RefreshFailed {
                        kind,
                        message: message.clone(),
                    });
                    events.push(ShelfEvent::MessageChanged {
                        message: Some(message),
                    });
                    RefreshOutcome::Failed { kind }
                }
            }
        };

        for event in events {
            self.events.broadcast(event);
        }

        outcome
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Search by title: exact match flag plus substring matches.
    pub fn search(&self, query: &str) -> SearchOutcome {
        query::search(&self.catalog(), query)
    }

    /// All titles, ascending case-insensitively.
    pub fn sorted_by_title(&self) -> Vec<String> {
        query::sorted_by_title(&self.catalog())
    }

    /// All books, most downloaded first.
    pub fn sorted_by_downloads(&self) -> Vec<Book> {
        query::sorted_by_downloads(&self.catalog())
    }

    /// The first book with the highest download count.
    pub fn most_downloaded(&self) -> Option<Book> {
        query::most_downloaded(&self.catalog()).cloned()
    }

    /// Home screen summary of the most downloaded book.
    pub fn home_summary(&self) -> Option<HomeSummary> {
        query::most_downloaded(&self.catalog()).map(HomeSummary::from_book)
    }

    // =========================================================================
    // Search input
    // =========================================================================

    /// Store the query typed by the user.
    pub fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        {
            let mut state = self.write();
            if state.search_query == query {
                return;
            }
            state.search_query = query.clone();
        }
        self.events.broadcast(ShelfEvent::SearchQueryChanged { query });
    }

    pub fn search_query(&self) -> String {
        self.read().search_query.clone()
    }

    /// Run a search with the stored query and show its message.
    pub fn submit_search(&self) -> SearchOutcome {
        // One guard so a refresh cannot land between the search and the
        // message it produces
        let (outcome, query, message) = {
            let mut state = self.write();
            let query = state.search_query.clone();
            let outcome = query::search(&state.books, &query);
            let message = outcome.message().to_string();
            state.message = Some(message.clone());
            (outcome, query, message)
        };
        debug!(query = %query, found = outcome.found, matches = outcome.matches.len(), "Search submitted");

        self.events.broadcast(ShelfEvent::SearchCompleted {
            query,
            status: outcome.status(),
            matches: outcome.matches.len(),
        });
        self.events.broadcast(ShelfEvent::MessageChanged {
            message: Some(message),
        });

        outcome
    }

    /// Ask the owner to open the search page for the stored query.
    pub fn navigate_to_search(&self) -> NavigationRequest {
        let request = NavigationRequest::SearchedPage {
            query: self.search_query(),
        };
        self.events.broadcast(ShelfEvent::NavigationRequested {
            request: request.clone(),
        });
        request
    }

    // =========================================================================
    // Observable state
    // =========================================================================

    /// Current catalog snapshot.
    pub fn catalog(&self) -> Arc<Vec<Book>> {
        Arc::clone(&self.read().books)
    }

    /// Current user-facing message, if any.
    pub fn message(&self) -> Option<String> {
        self.read().message.clone()
    }

    pub fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.read().last_refreshed_at
    }

    pub fn snapshot(&self) -> ShelfSnapshot {
        let state = self.read();
        ShelfSnapshot {
            books: Arc::clone(&state.books),
            message: state.message.clone(),
            search_query: state.search_query.clone(),
            last_refreshed_at: state.last_refreshed_at,
        }
    }

    /// Receive every subsequent [`ShelfEvent`].
    pub fn subscribe(&self) -> broadcast::Receiver<ShelfEvent> {
        self.events.subscribe()
    }

    /// The channel behind [`BookShelf::subscribe`].
    pub fn broadcaster(&self) -> &ShelfBroadcaster {
        &self.events
    }
}
