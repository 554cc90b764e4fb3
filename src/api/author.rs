use crate::domain::DomainError;
use crate::models::author::{self, Entity as Author};
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
pub struct CreateAuthorRequest {
    firstname: String,
    lastname: String,
}

pub async fn list_authors(
    State(db): State<DatabaseConnection>,
) -> Result<impl IntoResponse, DomainError> {
    let authors = Author::find()
        .order_by_asc(author::Column::Lastname)
        .order_by_asc(author::Column::Firstname)
        .all(&db)
        .await?;
    Ok(Json(authors))
}

pub async fn create_author(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<CreateAuthorRequest>,
) -> Result<impl IntoResponse, DomainError> {
    if payload.firstname.trim().is_empty() || payload.lastname.trim().is_empty() {
        return Err(DomainError::InvalidArgument(
            "firstname and lastname are required".to_string(),
        ));
    }

    let now = chrono::Utc::now().to_rfc3339();
    let author = author::ActiveModel {
        firstname: Set(payload.firstname.trim().to_string()),
        lastname: Set(payload.lastname.trim().to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = author.insert(&db).await?;
    Ok((StatusCode::CREATED, Json(model)))
}

pub async fn get_author(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, DomainError> {
    Author::find_by_id(id)
        .one(&db)
        .await?
        .map(Json)
        .ok_or(DomainError::NotFound)
}

/// Authors whose lastname contains `name`
pub async fn authors_by_name(
    State(db): State<DatabaseConnection>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, DomainError> {
    let authors = Author::find()
        .filter(author::Column::Lastname.contains(name.trim()))
        .order_by_asc(author::Column::Lastname)
        .all(&db)
        .await?;
    Ok(Json(authors))
}

pub async fn delete_author(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, DomainError> {
    let result = Author::delete_by_id(id).exec(&db).await?;
    if result.rows_affected == 0 {
        return Err(DomainError::NotFound);
    }
    Ok(Json(json!({ "message": "Author deleted" })))
}
