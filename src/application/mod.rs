pub mod author;
pub mod book;
mod errors;
mod services;

pub use author::{AuthorService, AuthorStore};
pub use book::{BookService, BookStore};
pub use errors::{CatalogApplicationError, ErrorKind, Result};
pub use services::CatalogServices;
