pub mod author_existence;
pub mod book_existence;

pub use author_existence::AuthorExistence;
pub use book_existence::BookExistenceForAuthor;
