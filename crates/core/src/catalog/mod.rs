//! Remote book catalog retrieval.
//!
//! This module provides the `CatalogFetcher` trait and an HTTP implementation
//! that downloads the full book list from a catalog endpoint.

mod http;
mod types;

pub use http::HttpCatalogFetcher;
pub use types::{Author, Book};

pub(crate) use types::CatalogPayload;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when fetching the catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Endpoint URL is malformed or the host cannot be reached.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Non-success status or a body that is not well-formed JSON.
    #[error("Invalid response{}: {message}", status_suffix(.status))]
    InvalidResponse {
        status: Option<u16>,
        message: String,
    },

    /// Well-formed payload that does not match the book record schema.
    #[error("Failed to decode catalog: {0}")]
    DecodingFailure(String),

    /// Any other transport failure.
    #[error("{0}")]
    Unclassified(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default()
}

/// Fieldless discriminant of [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    InvalidEndpoint,
    InvalidResponse,
    DecodingFailure,
    Unclassified,
}

impl FetchErrorKind {
    /// Label used in metrics and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchErrorKind::InvalidEndpoint => "invalid_endpoint",
            FetchErrorKind::InvalidResponse => "invalid_response",
            FetchErrorKind::DecodingFailure => "decoding_failure",
            FetchErrorKind::Unclassified => "unclassified",
        }
    }
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::InvalidEndpoint(_) => FetchErrorKind::InvalidEndpoint,
            FetchError::InvalidResponse { .. } => FetchErrorKind::InvalidResponse,
            FetchError::DecodingFailure(_) => FetchErrorKind::DecodingFailure,
            FetchError::Unclassified(_) => FetchErrorKind::Unclassified,
        }
    }

    /// Human-readable message shown next to the catalog.
    pub fn display_message(&self) -> String {
        match self {
            FetchError::InvalidEndpoint(_) => "Invalid URL".to_string(),
            FetchError::InvalidResponse { .. } => "Invalid response".to_string(),
            FetchError::DecodingFailure(_) => "Decoding Error".to_string(),
            FetchError::Unclassified(_) => format!("Unexpected error: {}", self),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match e.classify() {
            Category::Data => FetchError::DecodingFailure(e.to_string()),
            Category::Syntax | Category::Eof => FetchError::InvalidResponse {
                status: None,
                message: format!("Malformed body: {}", e),
            },
            Category::Io => FetchError::Unclassified(e.to_string()),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() || e.is_connect() {
            FetchError::InvalidEndpoint(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::InvalidResponse {
                status: Some(status.as_u16()),
                message: e.to_string(),
            }
        } else if e.is_decode() {
            FetchError::DecodingFailure(e.to_string())
        } else {
            FetchError::Unclassified(e.to_string())
        }
    }
}

/// Source of the full book list.
///
/// Implementations perform one round trip per call and return the records
/// in upstream order.
#[async_trait]
pub trait CatalogFetcher: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Book>, FetchError>;
}

/// Decode a response body into books.
pub(crate) fn decode_catalog(body: &str) -> Result<Vec<Book>, FetchError> {
    let payload: CatalogPayload = serde_json::from_str(body)?;
    Ok(payload.into_books())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            FetchError::InvalidEndpoint("bad".into()).display_message(),
            "Invalid URL"
        );
        assert_eq!(
            FetchError::InvalidResponse {
                status: Some(500),
                message: "boom".into()
            }
            .display_message(),
            "Invalid response"
        );
        assert_eq!(
            FetchError::DecodingFailure("missing field".into()).display_message(),
            "Decoding Error"
        );
        assert_eq!(
            FetchError::Unclassified("timed out".into()).display_message(),
            "Unexpected error: timed out"
        );
    }

    #[test]
    fn test_invalid_response_display() {
        let err = FetchError::InvalidResponse {
            status: Some(503),
            message: "unavailable".into(),
        };
        assert_eq!(err.to_string(), "Invalid response (HTTP 503): unavailable");

        let err = FetchError::InvalidResponse {
            status: None,
            message: "truncated".into(),
        };
        assert_eq!(err.to_string(), "Invalid response: truncated");
    }

    #[test]
    fn test_decode_schema_mismatch_is_decoding_failure() {
        let err = decode_catalog(r#"{"results": [{"title": 7}]}"#).unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::DecodingFailure);
    }

    #[test]
    fn test_decode_wrong_envelope_is_decoding_failure() {
        let err = decode_catalog(r#"{"books": []}"#).unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::DecodingFailure);
    }

    #[test]
    fn test_decode_malformed_json_is_invalid_response() {
        let err = decode_catalog(r#"{"results": [ "#).unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::InvalidResponse);

        let err = decode_catalog("<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::InvalidResponse);
    }

    #[test]
    fn test_decode_preserves_order() {
        let books = decode_catalog(
            r#"[{"title": "C", "download_count": 3},
                {"title": "A", "download_count": 1},
                {"title": "B", "download_count": 2}]"#,
        )
        .unwrap();
        let titles: Vec<_> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(FetchErrorKind::DecodingFailure.as_str(), "decoding_failure");
        assert_eq!(FetchErrorKind::InvalidEndpoint.as_str(), "invalid_endpoint");
    }
}
