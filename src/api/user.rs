use crate::domain::DomainError;
use crate::models::user::{self, Entity as User};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use sea_orm::*;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct UserRequest {
    username: String,
    email: String,
    firstname: Option<String>,
    lastname: Option<String>,
    #[serde(default)]
    subscribed: bool,
    subscription_date: Option<NaiveDate>,
}

pub async fn list_users(
    State(db): State<DatabaseConnection>,
) -> Result<impl IntoResponse, DomainError> {
    let users = User::find()
        .order_by_asc(user::Column::Id)
        .all(&db)
        .await?;
    Ok(Json(users))
}

/// Trimmed username and email, rejected if invalid or already used by another user
async fn checked_identity(
    db: &DatabaseConnection,
    username: &str,
    email: &str,
    current_id: Option<i32>,
) -> Result<(String, String), DomainError> {
    let username = username.trim().to_string();
    let email = email.trim().to_string();

    if username.is_empty() {
        return Err(DomainError::InvalidArgument("username is required".to_string()));
    }
    if !email.contains('@') {
        return Err(DomainError::InvalidArgument(format!(
            "'{}' is not a valid email address",
            email
        )));
    }

    if let Some(existing) = User::find()
        .filter(user::Column::Username.eq(username.as_str()))
        .one(db)
        .await?
        && Some(existing.id) != current_id
    {
        return Err(DomainError::Conflict(format!(
            "username '{}' is already taken",
            username
        )));
    }
    if let Some(existing) = User::find()
        .filter(user::Column::Email.eq(email.as_str()))
        .one(db)
        .await?
        && Some(existing.id) != current_id
    {
        return Err(DomainError::Conflict(format!(
            "email '{}' is already registered",
            email
        )));
    }

    Ok((username, email))
}

fn subscription_date(payload: &UserRequest, today: NaiveDate) -> Option<NaiveDate> {
    match (payload.subscribed, payload.subscription_date) {
        (true, None) => Some(today),
        (_, date) => date,
    }
}

pub async fn create_user(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<UserRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let (username, email) = checked_identity(&db, &payload.username, &payload.email, None).await?;

    let now = chrono::Utc::now();
    let model = user::ActiveModel {
        username: Set(username),
        email: Set(email),
        firstname: Set(payload.firstname.clone()),
        lastname: Set(payload.lastname.clone()),
        subscribed: Set(payload.subscribed),
        subscription_date: Set(subscription_date(&payload, now.date_naive())),
        created_at: Set(now.to_rfc3339()),
        updated_at: Set(now.to_rfc3339()),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    tracing::info!("Created user {} ({})", model.username, model.id);
    Ok((StatusCode::CREATED, Json(model)))
}

pub async fn update_user(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<UserRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let existing = User::find_by_id(id)
        .one(&db)
        .await?
        .ok_or(DomainError::NotFound)?;
    let (username, email) =
        checked_identity(&db, &payload.username, &payload.email, Some(id)).await?;

    let now = chrono::Utc::now();
    let mut active: user::ActiveModel = existing.into();
    active.username = Set(username);
    active.email = Set(email);
    active.firstname = Set(payload.firstname.clone());
    active.lastname = Set(payload.lastname.clone());
    active.subscribed = Set(payload.subscribed);
    active.subscription_date = Set(subscription_date(&payload, now.date_naive()));
    active.updated_at = Set(now.to_rfc3339());

    let model = active.update(&db).await?;
    tracing::info!("Updated user {} ({})", model.username, model.id);
    Ok(Json(model))
}

pub async fn get_user(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, DomainError> {
    User::find_by_id(id)
        .one(&db)
        .await?
        .map(Json)
        .ok_or(DomainError::NotFound)
}

pub async fn user_by_username(
    State(db): State<DatabaseConnection>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, DomainError> {
    User::find()
        .filter(user::Column::Username.eq(username.trim()))
        .one(&db)
        .await?
        .map(Json)
        .ok_or(DomainError::NotFound)
}

pub async fn user_by_email(
    State(db): State<DatabaseConnection>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, DomainError> {
    User::find()
        .filter(user::Column::Email.eq(email.trim()))
        .one(&db)
        .await?
        .map(Json)
        .ok_or(DomainError::NotFound)
}

pub async fn delete_user(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, DomainError> {
    let user = User::find_by_id(id)
        .one(&db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let txn = db.begin().await?;
    crate::models::review::Entity::delete_many()
        .filter(crate::models::review::Column::UserId.eq(user.id))
        .exec(&txn)
        .await?;
    user.delete(&txn).await?;
    txn.commit().await?;

    Ok(Json(json!({ "message": "User deleted" })))
}
