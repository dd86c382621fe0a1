use crate::domain::{AuthorId, BookDetails, BookFilter, BookId, BookPatch, Isbn, NewBook, Pagination};
use crate::ports::{BookExistenceForAuthor, BookRepository, RepositoryError, book_existence};
use async_trait::async_trait;
use std::sync::Arc;

use crate::application::errors::{CatalogApplicationError, Result};

/// 書籍ストアゲートウェイ
///
/// 読み取りは常に著者を結合した`BookDetails`を返す。
/// ストレージの一意制約・参照制約の違反は、事前チェックと同じ業務エラーに変換する。
#[derive(Clone)]
pub struct BookStore {
    repository: Arc<dyn BookRepository>,
}

impl BookStore {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, new_book: NewBook) -> Result<BookDetails> {
        let isbn = new_book.isbn.clone();
        let author_id = new_book.author_id;

        self.repository
            .insert(new_book)
            .await
            .map_err(|e| constraint_error(e, Some(isbn), Some(author_id)))
    }

    pub async fn list(
        &self,
        filter: BookFilter,
        pagination: Pagination,
    ) -> Result<Vec<BookDetails>> {
        self.repository
            .find_many(filter, pagination)
            .await
            .map_err(CatalogApplicationError::RepositoryError)
    }

    pub async fn get(&self, id: BookId) -> Result<BookDetails> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(CatalogApplicationError::RepositoryError)?
            .ok_or(CatalogApplicationError::BookNotFound(id))
    }

    pub async fn update(&self, id: BookId, patch: BookPatch) -> Result<BookDetails> {
        let isbn = patch.isbn.clone();
        let author_id = patch.author_id;

        self.repository
            .update_by_id(id, patch)
            .await
            .map_err(|e| constraint_error(e, isbn, author_id))?
            .ok_or(CatalogApplicationError::BookNotFound(id))
    }

    pub async fn delete(&self, id: BookId) -> Result<()> {
        let deleted = self
            .repository
            .delete_by_id(id)
            .await
            .map_err(CatalogApplicationError::RepositoryError)?;

        if !deleted {
            return Err(CatalogApplicationError::BookNotFound(id));
        }
        Ok(())
    }

    /// ISBNがいずれかの書籍で使用済みか
    pub async fn isbn_in_use(&self, isbn: &Isbn) -> Result<bool> {
        self.repository
            .exists_by_isbn(isbn)
            .await
            .map_err(CatalogApplicationError::RepositoryError)
    }

    /// ISBNが指定した書籍以外で使用済みか
    pub async fn isbn_in_use_by_other(&self, isbn: &Isbn, book_id: BookId) -> Result<bool> {
        self.repository
            .exists_by_isbn_excluding(isbn, book_id)
            .await
            .map_err(CatalogApplicationError::RepositoryError)
    }

    pub async fn exists_for_author(&self, author_id: AuthorId) -> Result<bool> {
        self.repository
            .exists_by_author(author_id)
            .await
            .map_err(CatalogApplicationError::RepositoryError)
    }
}

#[async_trait]
impl BookExistenceForAuthor for BookStore {
    async fn exists_for_author(&self, author_id: AuthorId) -> book_existence::Result<bool> {
        Ok(self.repository.exists_by_author(author_id).await?)
    }
}

/// 書き込み時の制約違反を業務エラーに変換する
fn constraint_error(
    err: RepositoryError,
    isbn: Option<Isbn>,
    author_id: Option<AuthorId>,
) -> CatalogApplicationError {
    match (err, isbn, author_id) {
        (RepositoryError::UniqueViolation { field: "isbn" }, Some(isbn), _) => {
            CatalogApplicationError::IsbnConflict(isbn)
        }
        (RepositoryError::ForeignKeyViolation, _, Some(author_id)) => {
            CatalogApplicationError::InvalidAuthorReference(author_id)
        }
        (err, _, _) => CatalogApplicationError::RepositoryError(err),
    }
}
