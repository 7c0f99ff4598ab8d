//! Types produced by shelf queries and refreshes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Book, FetchErrorKind};

/// Whether a search found a book with exactly the requested title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Found,
    NotFound,
}

/// Result of searching the catalog by title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// The query as given.
    pub query: String,
    /// True when a stored title equals the query exactly.
    pub found: bool,
    /// Books whose title contains the query, in catalog order.
    pub matches: Vec<Book>,
}

impl SearchOutcome {
    pub fn status(&self) -> SearchStatus {
        if self.found {
            SearchStatus::Found
        } else {
            SearchStatus::NotFound
        }
    }

    /// Message shown to the user after submitting a search.
    pub fn message(&self) -> &'static str {
        match self.status() {
            SearchStatus::Found => "We have your book, yay!",
            SearchStatus::NotFound => "Sorry, we do not have your book!",
        }
    }

    /// Titles of the substring matches.
    pub fn matched_titles(&self) -> Vec<&str> {
        self.matches.iter().map(|b| b.title.as_str()).collect()
    }
}

/// Summary of the most downloaded book for the home screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeSummary {
    pub most_downloaded_book: String,
    /// Formatted as "Downloaded: N times".
    pub download_total: String,
}

impl HomeSummary {
    pub fn from_book(book: &Book) -> Self {
        Self {
            most_downloaded_book: book.title.clone(),
            download_total: format!("Downloaded: {} times", book.download_count),
        }
    }
}

/// Navigation requested by the shelf, consumed by whatever owns navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "destination", rename_all = "snake_case")]
pub enum NavigationRequest {
    /// Open the search page for the given query.
    SearchedPage { query: String },
}

/// What a call to `BookShelf::refresh` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// The catalog was replaced.
    Updated { count: usize },
    /// The fetch failed; the previous catalog is kept.
    Failed { kind: FetchErrorKind },
    /// A newer refresh started while this one was in flight; result dropped.
    Superseded,
}

/// Point-in-time copy of the shelf's observable state.
#[derive(Debug, Clone, Serialize)]
pub struct ShelfSnapshot {
    pub books: Arc<Vec<Book>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub search_query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

impl ShelfSnapshot {
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
