//! Google Books response parsing
//!
//! Turns raw search or volume JSON into [`Book`] records. Every optional field of the
//! external schema is resolved to a concrete value here, so downstream code never has
//! to deal with missing data.

use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::DomainError;
use crate::models::book::{Book, unknown_publication_date};

/// Author shown when a volume lists no authors
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Marker after which Google thumbnail URLs carry zoom/edge parameters
const ZOOM_MARKER: &str = "&zoom=1";

/// Parse a single response body. See [`parse_documents`].
pub fn parse_document(raw: &str) -> Result<Vec<Book>, DomainError> {
    parse_documents(&[raw])
}

/// Parse several response bodies into one candidate list.
///
/// Each document contributes one record per entry of its `items` array, or a single
/// record built from the document root when `items` is absent or empty (the shape of
/// a `volumes/{id}` lookup). Ordinals start at 1 and keep counting across documents.
pub fn parse_documents<S: AsRef<str>>(documents: &[S]) -> Result<Vec<Book>, DomainError> {
    let mut books = Vec::new();
    let mut next_id: i64 = 1;

    for raw in documents {
        let root: Value = serde_json::from_str(raw.as_ref())?;
        let entries: Vec<&Value> = match root.get("items").and_then(Value::as_array) {
            Some(items) if !items.is_empty() => items.iter().collect(),
            _ => vec![&root],
        };

        if !entries
            .iter()
            .any(|entry| entry.get("volumeInfo").is_some_and(Value::is_object))
        {
            return Err(DomainError::MalformedResponse(
                "no volumeInfo object in response".to_string(),
            ));
        }

        for entry in entries {
            books.push(book_from_item(entry, next_id));
            next_id += 1;
        }
    }

    Ok(books)
}

/// Parse the body of a search call.
///
/// A search with zero hits answers `{"kind": ..., "totalItems": 0}` with no `items`;
/// that is an empty candidate list, not a volume to synthesize.
pub fn parse_search_response(raw: &str) -> Result<Vec<Book>, DomainError> {
    if is_empty_search_envelope(&serde_json::from_str(raw)?) {
        return Ok(Vec::new());
    }
    parse_document(raw)
}

/// Number of entries in a search envelope's `items` array
pub fn count_items(raw: &str) -> Result<usize, DomainError> {
    let root: Value = serde_json::from_str(raw)?;
    Ok(root
        .get("items")
        .and_then(Value::as_array)
        .map_or(0, Vec::len))
}

fn is_empty_search_envelope(root: &Value) -> bool {
    let has_items = root
        .get("items")
        .and_then(Value::as_array)
        .is_some_and(|items| !items.is_empty());
    !has_items && root.get("totalItems").is_some() && root.get("volumeInfo").is_none()
}

fn book_from_item(item: &Value, id: i64) -> Book {
    let info = item.get("volumeInfo");
    let field = |name: &str| info.and_then(|i| i.get(name)).filter(|v| !v.is_null());

    let cover_url = info
        .and_then(|i| i.get("imageLinks"))
        .and_then(|links| links.get("thumbnail"))
        .map(text)
        .map(|thumb| strip_zoom(&thumb).to_string())
        .unwrap_or_default();

    Book {
        id,
        book_id: None,
        volume_id: item.get("id").map(text).unwrap_or_default(),
        title: field("title").map(text).unwrap_or_default(),
        author: field("authors")
            .and_then(first_text)
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        category: field("categories").and_then(first_text).unwrap_or_default(),
        description: field("description").map(text).unwrap_or_default(),
        cover_url,
        page_count: field("pageCount").map_or(0, integer),
        publication_date: field("publishedDate")
            .map(text)
            .map_or_else(unknown_publication_date, |d| year_start(&d)),
        reviews: Vec::new(),
        average_rating: None,
    }
}

/// Text content of a scalar node; null and containers render as empty
fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn first_text(value: &Value) -> Option<String> {
    value.as_array()?.first().map(text)
}

fn integer(value: &Value) -> i32 {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .and_then(|n| i32::try_from(n).ok())
        .unwrap_or(0)
}

fn strip_zoom(url: &str) -> &str {
    url.split(ZOOM_MARKER).next().unwrap_or(url)
}

/// January 1st of the year leading a `YYYY[-MM[-DD]]` string
fn year_start(published: &str) -> NaiveDate {
    published
        .split('-')
        .next()
        .and_then(|year| year.trim().parse::<i32>().ok())
        .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        .unwrap_or_else(unknown_publication_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MYTHICAL_MAN_MONTH: &str = r#"{"items":[{"id":"abc123","volumeInfo":{"title":"The Mythical Man-Month","authors":["Fred Brooks"],"pageCount":322,"publishedDate":"1995-08-12","imageLinks":{"thumbnail":"http://x/img.png&zoom=1&edge=curl"}}}]}"#;

    fn date(y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, 1, 1).unwrap()
    }

    #[test]
    fn test_parse_full_item() {
        let books = parse_document(MYTHICAL_MAN_MONTH).unwrap();
        assert_eq!(books.len(), 1);

        let book = &books[0];
        assert_eq!(book.id, 1);
        assert_eq!(book.volume_id, "abc123");
        assert_eq!(book.title, "The Mythical Man-Month");
        assert_eq!(book.author, "Fred Brooks");
        assert_eq!(book.page_count, 322);
        assert_eq!(book.publication_date, date(1995));
        assert_eq!(book.cover_url, "http://x/img.png");
        assert_eq!(book.category, "");
        assert_eq!(book.description, "");
        assert!(book.book_id.is_none());
        assert!(book.reviews.is_empty());
    }

    #[test]
    fn test_items_keep_order_and_sequential_ids() {
        let raw = r#"{"items":[
            {"id":"a","volumeInfo":{"title":"First"}},
            {"id":"b","volumeInfo":{"title":"Second"}},
            {"id":"c","volumeInfo":{"title":"Third"}}
        ]}"#;
        let books = parse_document(raw).unwrap();
        let ids: Vec<i64> = books.iter().map(|b| b.id).collect();
        let titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_root_fallback_for_single_volume() {
        let raw = r#"{"kind":"books#volume","id":"5wBQEp6ruIAC","volumeInfo":{"title":"Clean Code","authors":["Robert C. Martin","Someone Else"],"categories":["Computers","Software"]}}"#;
        let books = parse_document(raw).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, 1);
        assert_eq!(books[0].volume_id, "5wBQEp6ruIAC");
        assert_eq!(books[0].author, "Robert C. Martin");
        assert_eq!(books[0].category, "Computers");
    }

    #[test]
    fn test_empty_items_array_falls_back_to_root() {
        let raw = r#"{"items":[],"id":"z","volumeInfo":{"title":"Lonely"}}"#;
        let books = parse_document(raw).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Lonely");
    }

    #[test]
    fn test_missing_fields_use_fallbacks() {
        let raw = r#"{"items":[{"volumeInfo":{}}]}"#;
        let book = &parse_document(raw).unwrap()[0];
        assert_eq!(book.volume_id, "");
        assert_eq!(book.title, "");
        assert_eq!(book.author, UNKNOWN_AUTHOR);
        assert_eq!(book.category, "");
        assert_eq!(book.cover_url, "");
        assert_eq!(book.page_count, 0);
        assert_eq!(book.publication_date, unknown_publication_date());
    }

    #[test]
    fn test_null_and_empty_arrays_are_absent() {
        let raw = r#"{"items":[{"volumeInfo":{"title":"T","authors":[],"categories":null,"publishedDate":null,"pageCount":"n/a"}}]}"#;
        let book = &parse_document(raw).unwrap()[0];
        assert_eq!(book.author, UNKNOWN_AUTHOR);
        assert_eq!(book.category, "");
        assert_eq!(book.page_count, 0);
        assert_eq!(book.publication_date, unknown_publication_date());
    }

    #[test]
    fn test_year_only_and_garbage_dates() {
        let raw = r#"{"items":[
            {"volumeInfo":{"title":"A","publishedDate":"2004"}},
            {"volumeInfo":{"title":"B","publishedDate":"circa 1900"}}
        ]}"#;
        let books = parse_document(raw).unwrap();
        assert_eq!(books[0].publication_date, date(2004));
        assert_eq!(books[1].publication_date, unknown_publication_date());
    }

    #[test]
    fn test_cover_without_zoom_is_untouched() {
        assert_eq!(strip_zoom("http://x/img.png?id=1"), "http://x/img.png?id=1");
        assert_eq!(
            strip_zoom("http://books.google.com/content?id=X&printsec=frontcover&img=1&zoom=1&edge=curl&source=gbs_api"),
            "http://books.google.com/content?id=X&printsec=frontcover&img=1"
        );
    }

    #[test]
    fn test_ids_continue_across_documents() {
        let first = r#"{"items":[{"id":"a","volumeInfo":{"title":"A"}},{"id":"b","volumeInfo":{"title":"B"}}]}"#;
        let second = r#"{"items":[{"id":"c","volumeInfo":{"title":"C"}}]}"#;
        let books = parse_documents(&[first, second]).unwrap();
        assert_eq!(books.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(books[2].volume_id, "c");
    }

    #[test]
    fn test_zero_documents_yield_nothing() {
        let none: [&str; 0] = [];
        assert!(parse_documents(&none).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_document("{\"items\": [").unwrap_err();
        assert!(matches!(err, DomainError::MalformedResponse(_)));
    }

    #[test]
    fn test_missing_volume_info_everywhere() {
        let err = parse_document(r#"{"items":[{"id":"a"},{"id":"b"}]}"#).unwrap_err();
        assert!(matches!(err, DomainError::MalformedResponse(_)));
    }

    #[test]
    fn test_empty_search_envelope() {
        let raw = r#"{"kind":"books#volumes","totalItems":0}"#;
        assert!(parse_search_response(raw).unwrap().is_empty());
        assert_eq!(count_items(raw).unwrap(), 0);
        assert_eq!(count_items(MYTHICAL_MAN_MONTH).unwrap(), 1);
        assert_eq!(parse_search_response(MYTHICAL_MAN_MONTH).unwrap().len(), 1);
    }
}
