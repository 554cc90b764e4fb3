pub mod author;
pub mod books;
pub mod category;
pub mod error;
pub mod health;
pub mod review;
pub mod search;
pub mod user;

use axum::{
    Router,
    routing::{get, post},
};

use crate::infrastructure::AppState;

pub fn api_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Google Books
        .route("/books/search/:page/:size", get(search::browse_books))
        .route("/books/search/:page/:size/:term", get(search::search_books))
        .route("/books/details/:volume_id", get(search::book_details))
        .route("/books/import/:volume_id", post(books::import_book))
        // Local books
        .route("/books", get(books::list_books))
        .route("/books/genre/:genre", get(books::books_by_genre))
        .route("/books/title/:title", get(books::books_by_title))
        .route("/books/:id", get(books::get_book).delete(books::delete_book))
        // Authors
        .route(
            "/authors",
            get(author::list_authors).post(author::create_author),
        )
        .route("/authors/name/:name", get(author::authors_by_name))
        .route(
            "/authors/:id",
            get(author::get_author).delete(author::delete_author),
        )
        // Categories
        .route(
            "/categories",
            get(category::list_categories).post(category::create_category),
        )
        .route("/categories/genre/:genre", get(category::category_by_genre))
        .route(
            "/categories/:id",
            get(category::get_category)
                .put(category::update_category)
                .delete(category::delete_category),
        )
        // Users
        .route("/users", get(user::list_users).post(user::create_user))
        .route("/users/username/:username", get(user::user_by_username))
        .route("/users/email/:email", get(user::user_by_email))
        .route(
            "/users/:id",
            get(user::get_user)
                .put(user::update_user)
                .delete(user::delete_user),
        )
        // Reviews
        .route(
            "/reviews",
            get(review::list_reviews).post(review::create_review),
        )
        .route("/reviews/user/:user_id", get(review::reviews_by_user))
        .route("/reviews/book/:book_id", get(review::reviews_by_book))
        .route(
            "/reviews/:user_id/:book_id",
            get(review::get_review)
                .put(review::update_review)
                .delete(review::delete_review),
        )
        .with_state(state)
}
