use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub id_volume: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub page_number: i32,
    pub cover: Option<String>,
    pub publication_date: Option<Date>,
    pub author_id: Option<i32>,
    pub category_id: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::author::Entity",
        from = "Column::AuthorId",
        to = "super::author::Column::Id",
        on_delete = "SetNull"
    )]
    Author,
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "SetNull"
    )]
    Category,
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Date used when a volume carries no publication date
pub fn unknown_publication_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(0, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Book record exchanged with API clients.
///
/// `id` is an ordinal that only orders the list it was produced in; it is reassigned on
/// every parse or query and must never be used as a lookup key. Records projected from
/// local storage carry their durable key in `book_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_id: Option<i32>,
    pub volume_id: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub description: String,
    pub cover_url: String,
    pub page_count: i32,
    pub publication_date: NaiveDate,
    #[serde(default)]
    pub reviews: Vec<super::review::Model>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
}

impl Book {
    /// Project a stored book and its related rows into an exchange record
    pub fn from_local(
        ordinal: i64,
        model: Model,
        author: Option<super::author::Model>,
        category: Option<super::category::Model>,
        reviews: Vec<super::review::Model>,
    ) -> Self {
        let book = Self {
            id: ordinal,
            book_id: Some(model.id),
            volume_id: model.id_volume.unwrap_or_default(),
            title: model.title,
            author: author.map(|a| a.display_name()).unwrap_or_default(),
            category: category.map(|c| c.genre).unwrap_or_default(),
            description: model.description.unwrap_or_default(),
            cover_url: model.cover.unwrap_or_default(),
            page_count: model.page_number,
            publication_date: model
                .publication_date
                .unwrap_or_else(unknown_publication_date),
            reviews: Vec::new(),
            average_rating: None,
        };
        book.with_reviews(reviews)
    }

    /// Attach reviews and recompute the average rating
    pub fn with_reviews(mut self, reviews: Vec<super::review::Model>) -> Self {
        self.average_rating = if reviews.is_empty() {
            None
        } else {
            let sum: i32 = reviews.iter().map(|r| r.rating).sum();
            Some(f64::from(sum) / reviews.len() as f64)
        };
        self.reviews = reviews;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(id: i32) -> Model {
        Model {
            id,
            id_volume: None,
            title: "Dune".to_string(),
            description: None,
            page_number: 412,
            cover: None,
            publication_date: None,
            author_id: None,
            category_id: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn review(user_id: i32, rating: i32) -> super::super::review::Model {
        super::super::review::Model {
            user_id,
            book_id: 7,
            review: None,
            rating,
            creation_date: None,
        }
    }

    #[test]
    fn test_from_local_keeps_durable_id_apart_from_ordinal() {
        let book = Book::from_local(1, stored(7), None, None, vec![]);
        assert_eq!(book.id, 1);
        assert_eq!(book.book_id, Some(7));
        assert_eq!(book.publication_date, unknown_publication_date());
        assert!(book.average_rating.is_none());
    }

    #[test]
    fn test_average_rating() {
        let book = Book::from_local(1, stored(7), None, None, vec![review(1, 4), review(2, 5)]);
        assert_eq!(book.reviews.len(), 2);
        assert_eq!(book.average_rating, Some(4.5));
    }
}
