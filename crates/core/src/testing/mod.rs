//! Testing utilities and mock implementations.
//!
//! This module provides a mock [`CatalogFetcher`](crate::catalog::CatalogFetcher)
//! and fixture builders, allowing shelf and server tests to run without a
//! real catalog endpoint.
//!
//! # Example
//!
//! ```rust,ignore
//! use bookshelf_core::testing::{fixtures, MockCatalogFetcher};
//!
//! let fetcher = Arc::new(MockCatalogFetcher::new());
//! fetcher.set_books(fixtures::gutenberg_sample()).await;
//!
//! let shelf = BookShelf::new(fetcher.clone());
//! shelf.refresh().await;
//! ```

mod mock_catalog_fetcher;

pub use mock_catalog_fetcher::MockCatalogFetcher;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::{Author, Book};

    /// Create books from `(title, download_count)` pairs, in order.
    pub fn books(entries: &[(&str, u64)]) -> Vec<Book> {
        entries
            .iter()
            .map(|(title, downloads)| Book::new(*title, *downloads))
            .collect()
    }

    /// Create a fully populated book.
    pub fn book(id: u64, title: &str, author: &str, download_count: u64) -> Book {
        Book {
            id: Some(id),
            title: title.to_string(),
            download_count,
            authors: vec![Author {
                name: author.to_string(),
                birth_year: None,
                death_year: None,
            }],
            languages: vec!["en".to_string()],
            subjects: Vec::new(),
        }
    }

    /// A small catalog resembling a Gutendex response.
    pub fn gutenberg_sample() -> Vec<Book> {
        vec![
            book(84, "Frankenstein; Or, The Modern Prometheus", "Shelley, Mary Wollstonecraft", 95_000),
            book(1342, "Pride and Prejudice", "Austen, Jane", 70_000),
            book(2701, "Moby Dick; Or, The Whale", "Melville, Herman", 60_000),
            book(1513, "Romeo and Juliet", "Shakespeare, William", 58_000),
            book(158, "Emma", "Austen, Jane", 22_000),
        ]
    }

    /// Gutendex-style JSON body for the given books.
    pub fn gutendex_body(books: &[Book]) -> String {
        serde_json::json!({
            "count": books.len(),
            "next": null,
            "previous": null,
            "results": books,
        })
        .to_string()
    }
}
