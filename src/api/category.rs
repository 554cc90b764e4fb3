use crate::domain::DomainError;
use crate::infrastructure::repositories::book_repository::find_category_by_genre;
use crate::models::category::{self, Entity as Category};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::*;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct CategoryRequest {
    genre: String,
}

/// Trimmed genre, rejected if blank or already used by another category
async fn checked_genre(
    db: &DatabaseConnection,
    genre: &str,
    current_id: Option<i32>,
) -> Result<String, DomainError> {
    let genre = genre.trim();
    if genre.is_empty() {
        return Err(DomainError::InvalidArgument("genre is required".to_string()));
    }

    if let Some(existing) = find_category_by_genre(db, genre).await?
        && Some(existing.id) != current_id
    {
        return Err(DomainError::Conflict(format!(
            "category '{}' already exists",
            existing.genre
        )));
    }

    Ok(genre.to_string())
}

pub async fn list_categories(
    State(db): State<DatabaseConnection>,
) -> Result<impl IntoResponse, DomainError> {
    let categories = Category::find()
        .order_by_asc(category::Column::Genre)
        .all(&db)
        .await?;
    Ok(Json(categories))
}

pub async fn create_category(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<CategoryRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let genre = checked_genre(&db, &payload.genre, None).await?;
    let model = category::ActiveModel {
        genre: Set(genre),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    Ok((StatusCode::CREATED, Json(model)))
}

pub async fn get_category(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, DomainError> {
    Category::find_by_id(id)
        .one(&db)
        .await?
        .map(Json)
        .ok_or(DomainError::NotFound)
}

pub async fn category_by_genre(
    State(db): State<DatabaseConnection>,
    Path(genre): Path<String>,
) -> Result<impl IntoResponse, DomainError> {
    find_category_by_genre(&db, genre.trim())
        .await?
        .map(Json)
        .ok_or(DomainError::NotFound)
}

pub async fn update_category(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<CategoryRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let existing = Category::find_by_id(id)
        .one(&db)
        .await?
        .ok_or(DomainError::NotFound)?;
    let genre = checked_genre(&db, &payload.genre, Some(id)).await?;

    let mut active: category::ActiveModel = existing.into();
    active.genre = Set(genre);
    Ok(Json(active.update(&db).await?))
}

pub async fn delete_category(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, DomainError> {
    let result = Category::delete_by_id(id).exec(&db).await?;
    if result.rows_affected == 0 {
        return Err(DomainError::NotFound);
    }
    Ok(Json(json!({ "message": "Category deleted" })))
}
