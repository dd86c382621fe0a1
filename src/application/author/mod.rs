mod author_service;
mod author_store;

pub use author_service::AuthorService;
pub use author_store::AuthorStore;
