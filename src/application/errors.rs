use crate::domain::{AuthorId, BookId, Isbn};
use crate::ports::RepositoryError;
use thiserror::Error;

/// 蔵書カタログアプリケーション層のエラー
#[derive(Debug, Error)]
pub enum CatalogApplicationError {
    /// 著者が存在しない
    #[error("Author {0} not found!")]
    AuthorNotFound(AuthorId),

    /// 書籍が存在しない
    #[error("Book {0} not found!")]
    BookNotFound(BookId),

    /// ISBNが他の書籍で使用済み
    #[error("The provided ISBN {0} is already in use. Please use a unique ISBN.")]
    IsbnConflict(Isbn),

    /// 参照先の著者が存在しない
    #[error("The selected author does not exist. Please choose a valid author.")]
    InvalidAuthorReference(AuthorId),

    /// 書籍から参照されている著者は削除できない
    #[error("Author has existing books and cannot be removed.")]
    AuthorHasBooks(AuthorId),

    /// リポジトリのエラー
    #[error("Repository error")]
    RepositoryError(#[source] RepositoryError),

    /// AuthorExistenceのエラー
    #[error("Author existence check failed")]
    AuthorExistenceError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// BookExistenceForAuthorのエラー
    #[error("Book reference check failed")]
    BookReferenceError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// エラーの分類
///
/// HTTP層はこの分類でステータスコードを決定する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 指定されたIDのレコードが存在しない
    NotFound,
    /// 一意性（ISBN）違反
    Conflict,
    /// 存在しない著者への参照
    InvalidReference,
    /// 参照されている著者の削除
    ReferentialBlock,
    /// システム障害
    Internal,
}

impl CatalogApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthorNotFound(_) | Self::BookNotFound(_) => ErrorKind::NotFound,
            Self::IsbnConflict(_) => ErrorKind::Conflict,
            Self::InvalidAuthorReference(_) => ErrorKind::InvalidReference,
            Self::AuthorHasBooks(_) => ErrorKind::ReferentialBlock,
            Self::RepositoryError(_)
            | Self::AuthorExistenceError(_)
            | Self::BookReferenceError(_) => ErrorKind::Internal,
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, CatalogApplicationError>;
