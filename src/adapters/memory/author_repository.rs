use crate::domain::{Author, AuthorFilter, AuthorId, AuthorPatch, NewAuthor, Pagination};
use crate::ports::author_repository::AuthorRepository as AuthorRepositoryTrait;
use crate::ports::repository_error::{RepositoryError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{State, page};

/// AuthorRepositoryのインメモリ実装
#[derive(Debug, Clone)]
pub struct AuthorRepository {
    state: Arc<RwLock<State>>,
}

impl AuthorRepository {
    pub(crate) fn new(state: Arc<RwLock<State>>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl AuthorRepositoryTrait for AuthorRepository {
    async fn insert(&self, new_author: NewAuthor) -> Result<Author> {
        let author = Author::create(new_author, Utc::now());
        self.state.write().await.authors.push(author.clone());
        Ok(author)
    }

    async fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>> {
        let state = self.state.read().await;
        Ok(state.authors.iter().find(|a| a.id == id).cloned())
    }

    async fn find_many(&self, filter: AuthorFilter, pagination: Pagination) -> Result<Vec<Author>> {
        let state = self.state.read().await;
        let matching = state.authors.iter().filter(|a| filter.matches(a)).cloned();
        Ok(page(matching, pagination.offset, pagination.limit))
    }

    async fn update_by_id(&self, id: AuthorId, patch: AuthorPatch) -> Result<Option<Author>> {
        let mut state = self.state.write().await;
        let Some(author) = state.authors.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        author.apply(patch, Utc::now());
        Ok(Some(author.clone()))
    }

    /// 書籍から参照されている場合は`ForeignKeyViolation`
    async fn delete_by_id(&self, id: AuthorId) -> Result<bool> {
        let mut state = self.state.write().await;
        if state.books.iter().any(|b| b.author_id == id) {
            return Err(RepositoryError::ForeignKeyViolation);
        }

        let before = state.authors.len();
        state.authors.retain(|a| a.id != id);
        Ok(state.authors.len() < before)
    }

    async fn exists_by_id(&self, id: AuthorId) -> Result<bool> {
        Ok(self.state.read().await.author_exists(id))
    }
}
