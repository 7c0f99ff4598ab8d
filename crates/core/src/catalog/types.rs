//! Types for book records and the upstream catalog payload.

use serde::{Deserialize, Serialize};

/// A book record as mirrored from the upstream catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    /// Upstream identifier (opaque, used for navigation only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Book title.
    pub title: String,
    /// Number of times the book was downloaded upstream.
    pub download_count: u64,
    /// Authors in upstream order.
    #[serde(default)]
    pub authors: Vec<Author>,
    /// Language codes (e.g. "en").
    #[serde(default)]
    pub languages: Vec<String>,
    /// Subject headings.
    #[serde(default)]
    pub subjects: Vec<String>,
}

impl Book {
    /// Create a book with only the fields the queries look at.
    pub fn new(title: impl Into<String>, download_count: u64) -> Self {
        Self {
            id: None,
            title: title.into(),
            download_count,
            authors: Vec::new(),
            languages: Vec::new(),
            subjects: Vec::new(),
        }
    }
}

/// A book author.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    /// Author name, usually "Last, First".
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_year: Option<i32>,
}

// ============================================================================
// Upstream payload (private to the fetcher)
// ============================================================================

/// Accepted response bodies: the paginated envelope or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CatalogPayload {
    Envelope { results: Vec<Book> },
    Bare(Vec<Book>),
}

impl CatalogPayload {
    pub(crate) fn into_books(self) -> Vec<Book> {
        match self {
            CatalogPayload::Envelope { results } => results,
            CatalogPayload::Bare(books) => books,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_payload() {
        let json = r#"{
            "count": 2,
            "next": null,
            "previous": null,
            "results": [
                {
                    "id": 84,
                    "title": "Frankenstein; Or, The Modern Prometheus",
                    "authors": [{"name": "Shelley, Mary Wollstonecraft", "birth_year": 1797, "death_year": 1851}],
                    "languages": ["en"],
                    "subjects": ["Science fiction"],
                    "download_count": 95000
                },
                {"id": 1342, "title": "Pride and Prejudice", "download_count": 70000}
            ]
        }"#;

        let payload: CatalogPayload = serde_json::from_str(json).unwrap();
        let books = payload.into_books();

        assert_eq!(books.len(), 2);
        assert_eq!(books[0].id, Some(84));
        assert_eq!(books[0].authors[0].birth_year, Some(1797));
        assert_eq!(books[1].title, "Pride and Prejudice");
        assert!(books[1].authors.is_empty());
    }

    #[test]
    fn test_bare_array_payload() {
        let json = r#"[{"title": "A", "download_count": 1}]"#;
        let payload: CatalogPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.into_books(), vec![Book::new("A", 1)]);
    }

    #[test]
    fn test_negative_download_count_rejected() {
        let json = r#"[{"title": "A", "download_count": -4}]"#;
        assert!(serde_json::from_str::<CatalogPayload>(json).is_err());
    }

    #[test]
    fn test_missing_title_rejected() {
        let json = r#"{"results": [{"download_count": 4}]}"#;
        assert!(serde_json::from_str::<CatalogPayload>(json).is_err());
    }
}
