//! Seed the local catalogue from Google Books volumes

use crate::domain::{BookRepository, DomainError};
use crate::models::Book;
use crate::services::search_service::SearchService;

/// Outcome of an import: the stored book and whether it was newly inserted
#[derive(Debug)]
pub struct Imported {
    pub book: Book,
    pub created: bool,
}

/// Store the given volume locally unless a book already references it
pub async fn import_volume(
    search: &SearchService,
    books: &dyn BookRepository,
    volume_id: &str,
) -> Result<Imported, DomainError> {
    if let Some(existing) = books.find_by_volume_id(volume_id).await? {
        tracing::info!("Volume {} already stored as book {:?}", volume_id, existing.book_id);
        return Ok(Imported {
            book: existing,
            created: false,
        });
    }

    let external = search.fetch_volume(volume_id).await?;
    if external.title.trim().is_empty() {
        return Err(DomainError::InvalidArgument(format!(
            "volume {} has no title",
            volume_id
        )));
    }

    match books.create_from_volume(&external).await {
        Ok(book) => {
            tracing::info!("Imported volume {} as book {:?}", volume_id, book.book_id);
            Ok(Imported {
                book,
                created: true,
            })
        }
        // A concurrent import stored the volume first
        Err(DomainError::Conflict(detail)) => {
            tracing::warn!("Import of volume {} lost a race: {}", volume_id, detail);
            let book = books
                .find_by_volume_id(volume_id)
                .await?
                .ok_or(DomainError::Conflict(detail))?;
            Ok(Imported {
                book,
                created: false,
            })
        }
        Err(e) => Err(e),
    }
}
