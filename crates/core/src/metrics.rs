//! Prometheus metrics for core components.
//!
//! This module provides metrics for catalog refreshes: fetch outcomes,
//! fetch latency and the size of the current catalog.

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts};

// =============================================================================
// Catalog Fetch Metrics
// =============================================================================

/// Catalog fetches total by result.
pub static CATALOG_FETCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "bookshelf_catalog_fetches_total",
            "Total catalog fetches",
        ),
        &["result"], // "success", "invalid_endpoint", "invalid_response", "decoding_failure", "unclassified"
    )
    .unwrap()
});

/// Catalog fetch duration in seconds.
pub static CATALOG_FETCH_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "bookshelf_catalog_fetch_duration_seconds",
            "Duration of catalog fetches",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
    )
    .unwrap()
});

/// Refresh results discarded because a newer refresh started.
pub static REFRESHES_SUPERSEDED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "bookshelf_refreshes_superseded_total",
        "Refresh results discarded in favour of a newer refresh",
    )
    .unwrap()
});

// =============================================================================
// Catalog State Metrics
// =============================================================================

/// Books in the current catalog snapshot.
pub static CATALOG_BOOKS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("bookshelf_catalog_books", "Books in the current catalog").unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(CATALOG_FETCHES.clone()),
        Box::new(CATALOG_FETCH_DURATION.clone()),
        Box::new(REFRESHES_SUPERSEDED.clone()),
        Box::new(CATALOG_BOOKS.clone()),
    ]
}
