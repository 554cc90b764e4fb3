//! SeaORM implementation of ReviewRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{DomainError, ReviewInput, ReviewRepository};
use crate::models::review::{self, ActiveModel, Entity as ReviewEntity};
use crate::models::{book, user};

pub struct SeaOrmReviewRepository {
    db: DatabaseConnection,
}

impl SeaOrmReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

#[async_trait]
impl ReviewRepository for SeaOrmReviewRepository {
    async fn find_all(&self) -> Result<Vec<review::Model>, DomainError> {
        Ok(ReviewEntity::find()
            .order_by_asc(review::Column::BookId)
            .order_by_asc(review::Column::UserId)
            .all(&self.db)
            .await?)
    }

    async fn find_by_id(
        &self,
        user_id: i32,
        book_id: i32,
    ) -> Result<Option<review::Model>, DomainError> {
        Ok(ReviewEntity::find_by_id((user_id, book_id))
            .one(&self.db)
            .await?)
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<review::Model>, DomainError> {
        Ok(ReviewEntity::find()
            .filter(review::Column::UserId.eq(user_id))
            .order_by_asc(review::Column::BookId)
            .all(&self.db)
            .await?)
    }

    async fn find_by_book(&self, book_id: i32) -> Result<Vec<review::Model>, DomainError> {
        Ok(ReviewEntity::find()
            .filter(review::Column::BookId.eq(book_id))
            .order_by_asc(review::Column::UserId)
            .all(&self.db)
            .await?)
    }

    async fn create(&self, input: ReviewInput) -> Result<review::Model, DomainError> {
        let creation_date = input.validate(today())?;

        if user::Entity::find_by_id(input.user_id)
            .one(&self.db)
            .await?
            .is_none()
            || book::Entity::find_by_id(input.book_id)
                .one(&self.db)
                .await?
                .is_none()
        {
            return Err(DomainError::NotFound);
        }

        if self.find_by_id(input.user_id, input.book_id).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "user {} already reviewed book {}",
                input.user_id, input.book_id
            )));
        }

        let model = review::Model {
            user_id: input.user_id,
            book_id: input.book_id,
            review: input.review,
            rating: input.rating,
            creation_date: Some(creation_date),
        };

        ReviewEntity::insert(ActiveModel::from(model.clone()))
            .exec_without_returning(&self.db)
            .await?;

        Ok(model)
    }

    async fn update(
        &self,
        user_id: i32,
        book_id: i32,
        input: ReviewInput,
    ) -> Result<review::Model, DomainError> {
        let existing = self
            .find_by_id(user_id, book_id)
            .await?
            .ok_or(DomainError::NotFound)?;
        let creation_date = input.validate(today())?;

        let mut active: ActiveModel = existing.into();
        active.review = Set(input.review);
        active.rating = Set(input.rating);
        active.creation_date = Set(Some(creation_date));

        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, user_id: i32, book_id: i32) -> Result<(), DomainError> {
        let result = ReviewEntity::delete_by_id((user_id, book_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
