//! Review endpoints, keyed by (user_id, book_id)

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::domain::{DomainError, ReviewInput};
use crate::infrastructure::AppState;

/// Body of a review replacement; the key comes from the path
#[derive(Deserialize)]
pub struct UpdateReviewRequest {
    review: Option<String>,
    rating: i32,
    creation_date: Option<NaiveDate>,
}

pub async fn list_reviews(State(state): State<AppState>) -> Result<impl IntoResponse, DomainError> {
    Ok(Json(state.review_repo.find_all().await?))
}

pub async fn create_review(
    State(state): State<AppState>,
    Json(input): Json<ReviewInput>,
) -> Result<impl IntoResponse, DomainError> {
    let review = state.review_repo.create(input).await?;
    tracing::info!(
        "User {} reviewed book {} ({}/5)",
        review.user_id,
        review.book_id,
        review.rating
    );
    Ok((StatusCode::CREATED, Json(review)))
}

pub async fn get_review(
    State(state): State<AppState>,
    Path((user_id, book_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, DomainError> {
    state
        .review_repo
        .find_by_id(user_id, book_id)
        .await?
        .map(Json)
        .ok_or(DomainError::NotFound)
}

pub async fn reviews_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, DomainError> {
    Ok(Json(state.review_repo.find_by_user(user_id).await?))
}

pub async fn reviews_by_book(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
) -> Result<impl IntoResponse, DomainError> {
    Ok(Json(state.review_repo.find_by_book(book_id).await?))
}

pub async fn update_review(
    State(state): State<AppState>,
    Path((user_id, book_id)): Path<(i32, i32)>,
    Json(payload): Json<UpdateReviewRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let input = ReviewInput {
        user_id,
        book_id,
        review: payload.review,
        rating: payload.rating,
        creation_date: payload.creation_date,
    };
    Ok(Json(state.review_repo.update(user_id, book_id, input).await?))
}

pub async fn delete_review(
    State(state): State<AppState>,
    Path((user_id, book_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, DomainError> {
    state.review_repo.delete(user_id, book_id).await?;
    Ok(Json(json!({ "message": "Review deleted" })))
}
