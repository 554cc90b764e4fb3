//! Search orchestration over the Google Books API
//!
//! Builds the query, fetches raw bodies, parses them into a candidate list and
//! windows that list. Nothing is cached between calls.

use crate::domain::{BookRepository, DomainError};
use crate::models::Book;
use crate::modules::integrations::google_books::{GoogleBooksClient, build_query};
use crate::services::pagination::{Page, PageRequest};
use crate::services::{reconciliation, volume_parser};

#[derive(Clone, Debug)]
pub struct SearchService {
    client: GoogleBooksClient,
}

impl SearchService {
    pub fn new(client: GoogleBooksClient) -> Self {
        Self { client }
    }

    /// Single-call search: up to 40 volumes by relevance, then windowed
    pub async fn search(&self, page: i64, size: i64, term: &str) -> Result<Page<Book>, DomainError> {
        let request = PageRequest::new(page, size)?;
        let query = build_query(term);
        tracing::info!("Search '{}' page={} size={}", query, request.page, request.size);

        let body = self.client.search_volumes(&query).await?;
        let candidates = volume_parser::parse_search_response(&body)?;

        tracing::debug!("Search '{}' produced {} candidates", query, candidates.len());
        Ok(Page::of(candidates, request))
    }

    /// Bulk variant: sequential batches merged into one candidate list, then windowed
    pub async fn sweep(&self, page: i64, size: i64, term: &str) -> Result<Page<Book>, DomainError> {
        let request = PageRequest::new(page, size)?;
        let query = build_query(term);
        tracing::info!("Sweep '{}' page={} size={}", query, request.page, request.size);

        let pages = self.client.sweep_volumes(&query).await?;
        let bodies: Vec<&String> = pages.values().collect();
        let candidates = volume_parser::parse_documents(&bodies)?;

        tracing::debug!("Sweep '{}' produced {} candidates", query, candidates.len());
        Ok(Page::of(candidates, request))
    }

    /// The external record for one volume, without local enrichment
    pub async fn fetch_volume(&self, volume_id: &str) -> Result<Book, DomainError> {
        let body = self.client.fetch_volume(volume_id).await?;
        volume_parser::parse_document(&body)?
            .into_iter()
            .next()
            .ok_or(DomainError::NotFound)
    }

    /// Detail lookup: fetch the volume, then prefer a local record with the same title.
    ///
    /// The network call completes before storage is touched.
    pub async fn details(
        &self,
        books: &dyn BookRepository,
        volume_id: &str,
    ) -> Result<Book, DomainError> {
        tracing::info!("Details for volume {}", volume_id);
        let external = self.fetch_volume(volume_id).await?;
        reconciliation::reconcile(books, external).await
    }
}
