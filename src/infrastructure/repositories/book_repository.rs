//! SeaORM implementation of BookRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::domain::{BookRepository, DomainError};
use crate::models::book::{self, Entity as BookEntity, unknown_publication_date};
use crate::models::{Book, author, category, review};
use crate::services::volume_parser::UNKNOWN_AUTHOR;

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolve author, category and reviews for each row; ordinals follow input order
    async fn project(&self, models: Vec<book::Model>) -> Result<Vec<Book>, DomainError> {
        let mut books = Vec::with_capacity(models.len());

        for (index, model) in models.into_iter().enumerate() {
            let author = model.find_related(author::Entity).one(&self.db).await?;
            let category = model.find_related(category::Entity).one(&self.db).await?;
            let reviews = model
                .find_related(review::Entity)
                .order_by_asc(review::Column::UserId)
                .all(&self.db)
                .await?;

            books.push(Book::from_local(
                index as i64 + 1,
                model,
                author,
                category,
                reviews,
            ));
        }

        Ok(books)
    }
}

async fn find_or_create_author<C: ConnectionTrait>(
    conn: &C,
    display_name: &str,
    now: &str,
) -> Result<Option<i32>, DomainError> {
    let display_name = display_name.trim();
    if display_name.is_empty() || display_name == UNKNOWN_AUTHOR {
        return Ok(None);
    }

    let (firstname, lastname) = author::split_display_name(display_name);

    if let Some(existing) = author::Entity::find()
        .filter(author::Column::Firstname.eq(firstname.as_str()))
        .filter(author::Column::Lastname.eq(lastname.as_str()))
        .one(conn)
        .await?
    {
        return Ok(Some(existing.id));
    }

    let created = author::ActiveModel {
        firstname: Set(firstname),
        lastname: Set(lastname),
        created_at: Set(now.to_string()),
        updated_at: Set(now.to_string()),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    Ok(Some(created.id))
}

/// Categories are matched on genre, ignoring case
pub(crate) async fn find_category_by_genre<C: ConnectionTrait>(
    conn: &C,
    genre: &str,
) -> Result<Option<category::Model>, DomainError> {
    // LIKE narrows case-insensitively in SQLite; the exact comparison guards wildcards
    let candidates = category::Entity::find()
        .filter(category::Column::Genre.like(genre))
        .order_by_asc(category::Column::Id)
        .all(conn)
        .await?;

    Ok(candidates
        .into_iter()
        .find(|c| c.genre.eq_ignore_ascii_case(genre)))
}

async fn find_or_create_category<C: ConnectionTrait>(
    conn: &C,
    genre: &str,
) -> Result<Option<i32>, DomainError> {
    let genre = genre.trim();
    if genre.is_empty() {
        return Ok(None);
    }

    if let Some(existing) = find_category_by_genre(conn, genre).await? {
        return Ok(Some(existing.id));
    }

    let created = category::ActiveModel {
        genre: Set(genre.to_string()),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    Ok(Some(created.id))
}

fn non_empty(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_all(&self) -> Result<Vec<Book>, DomainError> {
        let models = BookEntity::find()
            .order_by_asc(book::Column::Id)
            .all(&self.db)
            .await?;
        self.project(models).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError> {
        let model = BookEntity::find_by_id(id).one(&self.db).await?;

        match model {
            Some(model) => Ok(self.project(vec![model]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    async fn find_by_title_like(&self, title: &str) -> Result<Vec<Book>, DomainError> {
        let models = BookEntity::find()
            .filter(book::Column::Title.contains(title))
            .order_by_asc(book::Column::Id)
            .all(&self.db)
            .await?;

        tracing::debug!("Title lookup '{}' matched {} local books", title, models.len());
        self.project(models).await
    }

    async fn find_by_genre(&self, genre: &str) -> Result<Vec<Book>, DomainError> {
        let Some(category) = find_category_by_genre(&self.db, genre.trim()).await? else {
            return Ok(Vec::new());
        };

        let models = BookEntity::find()
            .filter(book::Column::CategoryId.eq(category.id))
            .order_by_asc(book::Column::Id)
            .all(&self.db)
            .await?;
        self.project(models).await
    }

    async fn find_by_volume_id(&self, volume_id: &str) -> Result<Option<Book>, DomainError> {
        let model = BookEntity::find()
            .filter(book::Column::IdVolume.eq(volume_id))
            .order_by_asc(book::Column::Id)
            .one(&self.db)
            .await?;

        match model {
            Some(model) => Ok(self.project(vec![model]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    async fn create_from_volume(&self, book: &Book) -> Result<Book, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();
        let txn = self.db.begin().await?;

        let author_id = find_or_create_author(&txn, &book.author, &now).await?;
        let category_id = find_or_create_category(&txn, &book.category).await?;

        let publication_date = if book.publication_date == unknown_publication_date() {
            None
        } else {
            Some(book.publication_date)
        };

        let inserted = book::ActiveModel {
            id_volume: Set(non_empty(&book.volume_id)),
            title: Set(book.title.clone()),
            description: Set(non_empty(&book.description)),
            page_number: Set(book.page_count),
            cover: Set(non_empty(&book.cover_url)),
            publication_date: Set(publication_date),
            author_id: Set(author_id),
            category_id: Set(category_id),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        self.find_by_id(inserted.id)
            .await?
            .ok_or_else(|| DomainError::Internal(format!("book {} vanished", inserted.id)))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        review::Entity::delete_many()
            .filter(review::Column::BookId.eq(id))
            .exec(&txn)
            .await?;

        let result = BookEntity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        txn.commit().await?;
        Ok(())
    }
}
