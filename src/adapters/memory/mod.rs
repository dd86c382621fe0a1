pub mod author_repository;
pub mod book_repository;

use crate::domain::{Author, AuthorId, Book, BookDetails};
use std::sync::Arc;
use tokio::sync::RwLock;

pub use author_repository::AuthorRepository;
pub use book_repository::BookRepository;

/// インメモリストアの共有状態
///
/// 著者・書籍ともに登録順を保持する。
#[derive(Debug, Default)]
pub(crate) struct State {
    pub(crate) authors: Vec<Author>,
    pub(crate) books: Vec<Book>,
}

impl State {
    pub(crate) fn author_exists(&self, id: AuthorId) -> bool {
        self.authors.iter().any(|a| a.id == id)
    }

    /// 書籍に現在の著者を結合する
    pub(crate) fn details(&self, book: &Book) -> BookDetails {
        BookDetails {
            book: book.clone(),
            author: self
                .authors
                .iter()
                .find(|a| a.id == book.author_id)
                .cloned(),
        }
    }
}

/// インメモリのストレージ
///
/// 著者リポジトリと書籍リポジトリが同じ状態を共有する。
/// すべての書き込みは1つの書き込みロックの中で行われ、
/// PostgreSQLスキーマと同じ制約（isbnの一意性、著者への参照）を検査する。
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn author_repository(&self) -> AuthorRepository {
        AuthorRepository::new(self.state.clone())
    }

    pub fn book_repository(&self) -> BookRepository {
        BookRepository::new(self.state.clone())
    }
}

/// offset/limitで切り出す
pub(crate) fn page<T>(items: impl Iterator<Item = T>, offset: u64, limit: u64) -> Vec<T> {
    let offset = usize::try_from(offset).unwrap_or(usize::MAX);
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    items.skip(offset).take(limit).collect()
}
