//! Domain layer - Pure business abstractions
//!
//! This layer contains no HTTP handling and no queries.
//! Only trait definitions and domain error types.

pub mod errors;
pub mod repositories;

pub use errors::DomainError;
pub use repositories::*;
