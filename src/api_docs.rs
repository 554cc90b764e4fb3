use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::search::search_books,
        api::search::browse_books,
        api::search::book_details,
    ),
    tags(
        (name = "booktracker", description = "Book tracking API backed by Google Books")
    )
)]
pub struct ApiDoc;
