//! Local catalogue endpoints

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::models::Book;
use crate::services::import_service;

pub async fn list_books(State(state): State<AppState>) -> Result<impl IntoResponse, DomainError> {
    let books = state.book_repo.find_all().await?;
    Ok(Json(json!({
        "total": books.len(),
        "books": books,
    })))
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Book>, DomainError> {
    state
        .book_repo
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(DomainError::NotFound)
}

pub async fn books_by_genre(
    State(state): State<AppState>,
    Path(genre): Path<String>,
) -> Result<Json<Vec<Book>>, DomainError> {
    Ok(Json(state.book_repo.find_by_genre(&genre).await?))
}

pub async fn books_by_title(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<Vec<Book>>, DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidArgument("title must not be blank".to_string()));
    }
    Ok(Json(state.book_repo.find_by_title_like(&title).await?))
}

/// Copy a Google Books volume into the local catalogue
pub async fn import_book(
    State(state): State<AppState>,
    Path(volume_id): Path<String>,
) -> Result<impl IntoResponse, DomainError> {
    let imported =
        import_service::import_volume(&state.search, state.book_repo.as_ref(), &volume_id).await?;

    let (status, message) = if imported.created {
        (StatusCode::CREATED, "Book imported successfully")
    } else {
        (StatusCode::OK, "Book already in catalogue")
    };

    Ok((
        status,
        Json(json!({
            "message": message,
            "book": imported.book,
        })),
    ))
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, DomainError> {
    state.book_repo.delete(id).await?;
    Ok(Json(json!({"message": "Book deleted successfully"})))
}
