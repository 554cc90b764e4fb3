//! Clients for third-party book metadata services

pub mod google_books;
