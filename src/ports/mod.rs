pub mod author_existence;
pub mod author_repository;
pub mod book_existence;
pub mod book_repository;
pub mod repository_error;

pub use author_existence::AuthorExistence;
pub use author_repository::AuthorRepository;
pub use book_existence::BookExistenceForAuthor;
pub use book_repository::BookRepository;
pub use repository_error::RepositoryError;
