use crate::domain::{Author, AuthorFilter, AuthorId, AuthorPatch, NewAuthor, Pagination};
use crate::ports::{AuthorExistence, AuthorRepository, RepositoryError, author_existence};
use async_trait::async_trait;
use std::sync::Arc;

use crate::application::errors::{CatalogApplicationError, Result};

/// 著者ストアゲートウェイ
///
/// アプリケーション層の著者操作をリポジトリ呼び出しに変換する。
/// 「存在しない」はすべて`AuthorNotFound`として返す。
#[derive(Clone)]
pub struct AuthorStore {
    repository: Arc<dyn AuthorRepository>,
}

impl AuthorStore {
    pub fn new(repository: Arc<dyn AuthorRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, new_author: NewAuthor) -> Result<Author> {
        self.repository
            .insert(new_author)
            .await
            .map_err(CatalogApplicationError::RepositoryError)
    }

    pub async fn list(&self, filter: AuthorFilter, pagination: Pagination) -> Result<Vec<Author>> {
        self.repository
            .find_many(filter, pagination)
            .await
            .map_err(CatalogApplicationError::RepositoryError)
    }

    pub async fn get(&self, id: AuthorId) -> Result<Author> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(CatalogApplicationError::RepositoryError)?
            .ok_or(CatalogApplicationError::AuthorNotFound(id))
    }

    pub async fn update(&self, id: AuthorId, patch: AuthorPatch) -> Result<Author> {
        self.repository
            .update_by_id(id, patch)
            .await
            .map_err(CatalogApplicationError::RepositoryError)?
            .ok_or(CatalogApplicationError::AuthorNotFound(id))
    }

    /// 著者を削除する
    ///
    /// ストレージ側の参照制約に阻まれた場合も`AuthorHasBooks`として返す。
    pub async fn delete(&self, id: AuthorId) -> Result<()> {
        match self.repository.delete_by_id(id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(CatalogApplicationError::AuthorNotFound(id)),
            Err(RepositoryError::ForeignKeyViolation) => {
                Err(CatalogApplicationError::AuthorHasBooks(id))
            }
            Err(e) => Err(CatalogApplicationError::RepositoryError(e)),
        }
    }

    pub async fn exists(&self, id: AuthorId) -> Result<bool> {
        self.repository
            .exists_by_id(id)
            .await
            .map_err(CatalogApplicationError::RepositoryError)
    }
}

#[async_trait]
impl AuthorExistence for AuthorStore {
    async fn exists(&self, author_id: AuthorId) -> author_existence::Result<bool> {
        Ok(self.repository.exists_by_id(author_id).await?)
    }
}
