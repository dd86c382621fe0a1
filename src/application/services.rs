use crate::ports::{AuthorRepository, BookRepository};
use std::sync::Arc;

use super::author::{AuthorService, AuthorStore};
use super::book::{BookService, BookStore};

/// サービスの依存関係
///
/// 著者サービスと書籍サービスは互いに問い合わせを行うが、
/// どちらも相手の具象型ではなく狭いポートにのみ依存する：
/// - 著者サービス → `BookExistenceForAuthor`（書籍ストア）
/// - 書籍サービス → `AuthorExistence`（著者ストア）
///
/// どちらのサービスも状態を持たないため、Clone して共有できる。
#[derive(Clone)]
pub struct CatalogServices {
    pub authors: AuthorService,
    pub books: BookService,
}

impl CatalogServices {
    pub fn new(
        author_repository: Arc<dyn AuthorRepository>,
        book_repository: Arc<dyn BookRepository>,
    ) -> Self {
        let author_store = AuthorStore::new(author_repository);
        let book_store = BookStore::new(book_repository);

        let authors = AuthorService::new(author_store.clone(), Arc::new(book_store.clone()));
        let books = BookService::new(book_store, Arc::new(author_store));

        Self { authors, books }
    }
}
