//! Google Books search and detail endpoints

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderName, HeaderValue},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::models::Book;
use crate::services::Page;

#[derive(Debug, Default, Deserialize)]
pub struct SearchOptions {
    /// Use the multi-call sweep instead of a single 40-result call
    #[serde(default)]
    pub sweep: bool,
}

#[utoipa::path(
    get,
    path = "/api/books/search/{page}/{size}/{term}",
    params(
        ("page" = i64, Path, description = "Zero-based page index"),
        ("size" = i64, Path, description = "Page size, at least 1"),
        ("term" = String, Path, description = "Free-text Google Books query"),
        ("sweep" = Option<bool>, Query, description = "Collect up to 100 results in batches of 10")
    ),
    responses(
        (status = 200, description = "Page of books with X-Page-Number, X-Page-Size and X-Total-Elements headers"),
        (status = 400, description = "Negative page or non-positive size"),
        (status = 502, description = "Google Books answered with an unreadable body"),
        (status = 503, description = "Google Books unreachable")
    )
)]
pub async fn search_books(
    State(state): State<AppState>,
    Path((page, size, term)): Path<(i64, i64, String)>,
    Query(options): Query<SearchOptions>,
) -> Result<impl IntoResponse, DomainError> {
    run_search(&state, page, size, &term, options).await
}

/// Same as [`search_books`] with an empty term, which browses the default subject
#[utoipa::path(
    get,
    path = "/api/books/search/{page}/{size}",
    params(
        ("page" = i64, Path, description = "Zero-based page index"),
        ("size" = i64, Path, description = "Page size, at least 1"),
        ("sweep" = Option<bool>, Query, description = "Collect up to 100 results in batches of 10")
    ),
    responses(
        (status = 200, description = "Page of books from the default subject")
    )
)]
pub async fn browse_books(
    State(state): State<AppState>,
    Path((page, size)): Path<(i64, i64)>,
    Query(options): Query<SearchOptions>,
) -> Result<impl IntoResponse, DomainError> {
    run_search(&state, page, size, "", options).await
}

async fn run_search(
    state: &AppState,
    page: i64,
    size: i64,
    term: &str,
    options: SearchOptions,
) -> Result<(HeaderMap, Json<Page<Book>>), DomainError> {
    let result = if options.sweep {
        state.search.sweep(page, size, term).await?
    } else {
        state.search.search(page, size, term).await?
    };

    Ok((page_headers(&result), Json(result)))
}

fn page_headers(page: &Page<Book>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in [
        ("x-page-number", page.number),
        ("x-page-size", page.size),
        ("x-total-elements", page.total_elements),
    ] {
        headers.insert(HeaderName::from_static(name), HeaderValue::from(value));
    }
    headers
}

#[utoipa::path(
    get,
    path = "/api/books/details/{volume_id}",
    params(
        ("volume_id" = String, Path, description = "Google Books volume id")
    ),
    responses(
        (status = 200, description = "The volume, replaced by the local book of the same title when one exists"),
        (status = 502, description = "Google Books answered with an unreadable body"),
        (status = 503, description = "Google Books unreachable")
    )
)]
pub async fn book_details(
    State(state): State<AppState>,
    Path(volume_id): Path<String>,
) -> Result<Json<Book>, DomainError> {
    let book = state
        .search
        .details(state.book_repo.as_ref(), &volume_id)
        .await?;
    Ok(Json(book))
}
