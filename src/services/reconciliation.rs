//! Merge externally fetched books with locally stored ones
//!
//! Title is the only join key available: Google volume ids are not stored for books
//! created locally. Two local books sharing a title resolve to the first one in
//! storage order.

use crate::domain::{BookRepository, DomainError};
use crate::models::Book;

/// Return the first local book whose title matches `external`'s, or `external` itself.
///
/// The local record wins because it carries reviews and ratings. It keeps the
/// external ordinal and, if it has none of its own, the external volume id.
pub async fn reconcile(books: &dyn BookRepository, external: Book) -> Result<Book, DomainError> {
    if external.title.trim().is_empty() {
        return Ok(external);
    }

    let local = books
        .find_by_title_like(&external.title)
        .await?
        .into_iter()
        .next();

    match local {
        Some(local) => {
            tracing::debug!(
                "Volume {} matched local book {:?} by title",
                external.volume_id,
                local.book_id
            );
            let volume_id = if local.volume_id.is_empty() {
                external.volume_id
            } else {
                local.volume_id.clone()
            };
            Ok(Book {
                id: external.id,
                volume_id,
                ..local
            })
        }
        None => Ok(external),
    }
}
