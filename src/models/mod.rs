pub mod author;
pub mod book;
pub mod category;
pub mod review;
pub mod user;

pub use book::Book;
