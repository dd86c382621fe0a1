use crate::domain::{
    AuthorId, Book, BookDetails, BookFilter, BookId, BookPatch, Isbn, NewBook, Pagination,
};
use crate::ports::book_repository::BookRepository as BookRepositoryTrait;
use crate::ports::repository_error::{RepositoryError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{State, page};

/// BookRepositoryのインメモリ実装
///
/// 書き込み時に以下を検査する：
/// - isbnの一意性（違反時は`UniqueViolation { field: "isbn" }`）
/// - 参照先著者の存在（違反時は`ForeignKeyViolation`）
#[derive(Debug, Clone)]
pub struct BookRepository {
    state: Arc<RwLock<State>>,
}

impl BookRepository {
    pub(crate) fn new(state: Arc<RwLock<State>>) -> Self {
        Self { state }
    }
}

fn isbn_taken(state: &State, isbn: &Isbn, excluded: Option<BookId>) -> bool {
    state
        .books
        .iter()
        .any(|b| &b.isbn == isbn && Some(b.id) != excluded)
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn insert(&self, new_book: NewBook) -> Result<BookDetails> {
        let mut state = self.state.write().await;

        if isbn_taken(&state, &new_book.isbn, None) {
            return Err(RepositoryError::UniqueViolation { field: "isbn" });
        }
        if !state.author_exists(new_book.author_id) {
            return Err(RepositoryError::ForeignKeyViolation);
        }

        let book = Book::create(new_book, Utc::now());
        let details = state.details(&book);
        state.books.push(book);
        Ok(details)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<BookDetails>> {
        let state = self.state.read().await;
        Ok(state
            .books
            .iter()
            .find(|b| b.id == id)
            .map(|b| state.details(b)))
    }

    async fn find_many(
        &self,
        filter: BookFilter,
        pagination: Pagination,
    ) -> Result<Vec<BookDetails>> {
        let state = self.state.read().await;
        let matching = state
            .books
            .iter()
            .filter(|b| filter.matches(b))
            .map(|b| state.details(b));
        Ok(page(matching, pagination.offset, pagination.limit))
    }

    async fn update_by_id(&self, id: BookId, patch: BookPatch) -> Result<Option<BookDetails>> {
        let mut state = self.state.write().await;

        let Some(index) = state.books.iter().position(|b| b.id == id) else {
            return Ok(None);
        };
        if let Some(isbn) = &patch.isbn {
            if isbn_taken(&state, isbn, Some(id)) {
                return Err(RepositoryError::UniqueViolation { field: "isbn" });
            }
        }
        if let Some(author_id) = patch.author_id {
            if !state.author_exists(author_id) {
                return Err(RepositoryError::ForeignKeyViolation);
            }
        }

        state.books[index].apply(patch, Utc::now());
        let details = state.details(&state.books[index]);
        Ok(Some(details))
    }

    async fn delete_by_id(&self, id: BookId) -> Result<bool> {
        let mut state = self.state.write().await;
        let before = state.books.len();
        state.books.retain(|b| b.id != id);
        Ok(state.books.len() < before)
    }

    async fn exists_by_isbn(&self, isbn: &Isbn) -> Result<bool> {
        Ok(isbn_taken(&*self.state.read().await, isbn, None))
    }

    async fn exists_by_isbn_excluding(&self, isbn: &Isbn, excluded: BookId) -> Result<bool> {
        Ok(isbn_taken(&*self.state.read().await, isbn, Some(excluded)))
    }

    async fn exists_by_author(&self, author_id: AuthorId) -> Result<bool> {
        let state = self.state.read().await;
        Ok(state.books.iter().any(|b| b.author_id == author_id))
    }
}
