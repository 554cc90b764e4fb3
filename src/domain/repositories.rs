//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::DomainError;
use crate::models::book::Book;
use crate::models::review;

/// Repository trait for locally persisted books.
///
/// Every method returns fully projected [`Book`] records: author display name,
/// category genre and attached reviews are resolved. The `id` of each record is its
/// position in the returned list; `book_id` carries the durable key.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find all local books, ordered by id
    async fn find_all(&self) -> Result<Vec<Book>, DomainError>;

    /// Find a single book by its durable id
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError>;

    /// Books whose title contains `title`, case-insensitively, ordered by id
    async fn find_by_title_like(&self, title: &str) -> Result<Vec<Book>, DomainError>;

    /// Books whose category genre equals `genre`, case-insensitively
    async fn find_by_genre(&self, genre: &str) -> Result<Vec<Book>, DomainError>;

    /// Book previously imported from the given external volume
    async fn find_by_volume_id(&self, volume_id: &str) -> Result<Option<Book>, DomainError>;

    /// Persist an externally parsed record, resolving author and category rows
    async fn create_from_volume(&self, book: &Book) -> Result<Book, DomainError>;

    /// Delete a book and its reviews
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Input for creating or replacing a review
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ReviewInput {
    pub user_id: i32,
    pub book_id: i32,
    pub review: Option<String>,
    pub rating: i32,
    pub creation_date: Option<NaiveDate>,
}

/// Repository trait for reviews, keyed by (user_id, book_id)
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<review::Model>, DomainError>;

    async fn find_by_id(
        &self,
        user_id: i32,
        book_id: i32,
    ) -> Result<Option<review::Model>, DomainError>;

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<review::Model>, DomainError>;

    async fn find_by_book(&self, book_id: i32) -> Result<Vec<review::Model>, DomainError>;

    /// Insert a new review. Fails with `Conflict` if the user already reviewed the book.
    async fn create(&self, input: ReviewInput) -> Result<review::Model, DomainError>;

    /// Replace text, rating and date of an existing review
    async fn update(
        &self,
        user_id: i32,
        book_id: i32,
        input: ReviewInput,
    ) -> Result<review::Model, DomainError>;

    async fn delete(&self, user_id: i32, book_id: i32) -> Result<(), DomainError>;
}

impl ReviewInput {
    /// Check the rating range and the creation date; returns the date to store.
    ///
    /// A missing date means `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<NaiveDate, DomainError> {
        if !(1..=5).contains(&self.rating) {
            return Err(DomainError::InvalidArgument(format!(
                "rating must be between 1 and 5, got {}",
                self.rating
            )));
        }

        let date = self.creation_date.unwrap_or(today);
        if date > today {
            return Err(DomainError::InvalidArgument(
                "creation date cannot be in the future".to_string(),
            ));
        }

        Ok(date)
    }
}
