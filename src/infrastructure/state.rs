//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{BookRepository, ReviewRepository};
use crate::infrastructure::{SeaOrmBookRepository, SeaOrmReviewRepository};
use crate::modules::integrations::google_books::GoogleBooksClient;
use crate::services::SearchService;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection for handlers that query entities directly
    db: DatabaseConnection,
    /// Book repository
    pub book_repo: Arc<dyn BookRepository>,
    /// Review repository
    pub review_repo: Arc<dyn ReviewRepository>,
    /// Google Books search pipeline
    pub search: SearchService,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection, google_books: GoogleBooksClient) -> Self {
        let book_repo = Arc::new(SeaOrmBookRepository::new(db.clone()));
        let review_repo = Arc::new(SeaOrmReviewRepository::new(db.clone()));

        Self {
            db,
            book_repo,
            review_repo,
            search: SearchService::new(google_books),
        }
    }
}

// Implement FromRef to allow extracting DatabaseConnection from AppState
impl axum::extract::FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
