//! Book shelf API handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use bookshelf_core::{
    Book, HomeSummary, NavigationRequest, RefreshOutcome, SearchOutcome, SearchStatus,
    ShelfSnapshot,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct SetSearchQueryRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub result: RefreshOutcome,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    #[serde(flatten)]
    pub outcome: SearchOutcome,
    pub status: &'static str,
    pub message: &'static str,
}

impl From<SearchOutcome> for SearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        let status = match outcome.status() {
            SearchStatus::Found => "found",
            SearchStatus::NotFound => "not_found",
        };
        let message = outcome.message();
        Self {
            outcome,
            status,
            message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TitleListResponse {
    pub titles: Vec<String>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct BookListResponse {
    pub books: Vec<Book>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn not_found(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/books
///
/// Current catalog, message and search input.
pub async fn get_shelf(State(state): State<Arc<AppState>>) -> Json<ShelfSnapshot> {
    Json(state.shelf().snapshot())
}

/// POST /api/v1/books/refresh
///
/// Fetch the catalog again. Failures are reported in the body, not as an
/// HTTP error, since the shelf stays usable.
pub async fn refresh(State(state): State<Arc<AppState>>) -> Json<RefreshResponse> {
    let shelf = state.shelf();
    let outcome = shelf.refresh().await;
    info!(?outcome, "Refresh requested via API");

    Json(RefreshResponse {
        result: outcome,
        total: shelf.catalog().len(),
        message: shelf.message(),
    })
}

/// GET /api/v1/books/search?q=
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    Json(state.shelf().search(&params.q).into())
}

/// PUT /api/v1/books/search
///
/// Store the pending search query.
pub async fn set_search_query(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetSearchQueryRequest>,
) -> StatusCode {
    state.shelf().set_search_query(request.query);
    StatusCode::NO_CONTENT
}

/// POST /api/v1/books/search/submit
///
/// Search with the stored query and set the shelf message.
pub async fn submit_search(State(state): State<Arc<AppState>>) -> Json<SearchResponse> {
    Json(state.shelf().submit_search().into())
}

/// POST /api/v1/books/search/navigate
pub async fn navigate_to_search(State(state): State<Arc<AppState>>) -> Json<NavigationRequest> {
    Json(state.shelf().navigate_to_search())
}

/// GET /api/v1/books/sorted/title
pub async fn sorted_by_title(State(state): State<Arc<AppState>>) -> Json<TitleListResponse> {
    let titles = state.shelf().sorted_by_title();
    let total = titles.len();
    Json(TitleListResponse { titles, total })
}

/// GET /api/v1/books/sorted/downloads
pub async fn sorted_by_downloads(State(state): State<Arc<AppState>>) -> Json<BookListResponse> {
    let books = state.shelf().sorted_by_downloads();
    let total = books.len();
    Json(BookListResponse { books, total })
}

/// GET /api/v1/books/most-downloaded
pub async fn most_downloaded(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Book>, impl IntoResponse> {
    state
        .shelf()
        .most_downloaded()
        .map(Json)
        .ok_or_else(|| not_found("Catalog is empty"))
}

/// GET /api/v1/books/summary
pub async fn home_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HomeSummary>, impl IntoResponse> {
    state
        .shelf()
        .home_summary()
        .map(Json)
        .ok_or_else(|| not_found("Catalog is empty"))
}
