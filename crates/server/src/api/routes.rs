use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{books, handlers, middleware::metrics_middleware, ws};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Catalog state
        .route("/books", get(books::get_shelf))
        .route("/books/refresh", post(books::refresh))
        // Search
        .route(
            "/books/search",
            get(books::search).put(books::set_search_query),
        )
        .route("/books/search/submit", post(books::submit_search))
        .route("/books/search/navigate", post(books::navigate_to_search))
        // Derived views
        .route("/books/sorted/title", get(books::sorted_by_title))
        .route("/books/sorted/downloads", get(books::sorted_by_downloads))
        .route("/books/most-downloaded", get(books::most_downloaded))
        .route("/books/summary", get(books::home_summary))
        // Real-time events
        .route("/ws", get(ws::ws_handler))
        .route_layer(middleware::from_fn(metrics_middleware))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
}
