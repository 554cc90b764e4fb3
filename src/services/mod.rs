//! Business logic without the HTTP layer
//!
//! The Google Books pipeline: `volume_parser` -> `pagination` -> `search_service`,
//! with `reconciliation` enriching detail lookups from local storage.

pub mod import_service;
pub mod pagination;
pub mod reconciliation;
pub mod search_service;
pub mod volume_parser;

pub use pagination::{Page, PageRequest};
pub use search_service::SearchService;
