mod book_service;
mod book_store;

pub use book_service::BookService;
pub use book_store::BookStore;
