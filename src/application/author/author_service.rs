use crate::domain::{Author, AuthorFilter, AuthorId, AuthorPatch, NewAuthor, PageRequest, paginate};
use crate::ports::BookExistenceForAuthor;
use std::sync::Arc;

use super::author_store::AuthorStore;
use crate::application::errors::{CatalogApplicationError, Result};

/// 著者整合性サービス
///
/// 削除ガード（書籍から参照されている著者は削除できない）を担う。
/// 書籍側への問い合わせは`BookExistenceForAuthor`ポート経由で行い、
/// 書籍サービスの具象型には依存しない。
#[derive(Clone)]
pub struct AuthorService {
    store: AuthorStore,
    books: Arc<dyn BookExistenceForAuthor>,
}

impl AuthorService {
    pub fn new(store: AuthorStore, books: Arc<dyn BookExistenceForAuthor>) -> Self {
        Self { store, books }
    }

    /// 著者を登録する
    ///
    /// 他の集約にまたがる検証はない。
    pub async fn create(&self, new_author: NewAuthor) -> Result<Author> {
        tracing::info!(
            first_name = %new_author.first_name,
            last_name = %new_author.last_name,
            "Creating author"
        );
        let author = self.store.create(new_author).await?;
        tracing::info!(author_id = %author.id, "Author created");
        Ok(author)
    }

    /// 著者一覧を取得する
    ///
    /// `search`は名・姓のいずれかに対する大文字小文字を区別しない部分一致。
    pub async fn list(&self, page: PageRequest, search: Option<String>) -> Result<Vec<Author>> {
        tracing::info!(
            page = ?page.page,
            limit = ?page.limit,
            search = ?search,
            "Fetching authors"
        );
        self.store
            .list(AuthorFilter::new(search), paginate(page))
            .await
    }

    pub async fn get_by_id(&self, id: AuthorId) -> Result<Author> {
        tracing::info!(author_id = %id, "Fetching author by ID");
        self.store.get(id).await
    }

    /// 著者を部分更新する
    ///
    /// 指定されなかった項目は変更しない。
    pub async fn update(&self, id: AuthorId, patch: AuthorPatch) -> Result<Author> {
        tracing::info!(author_id = %id, ?patch, "Updating author");
        self.store.get(id).await?;

        let author = self.store.update(id, patch).await?;
        tracing::info!(author_id = %author.id, "Updated author");
        Ok(author)
    }

    /// 著者を削除する
    ///
    /// ビジネスルール：
    /// - 著者が存在すること
    /// - 著者を参照する書籍が存在しないこと
    ///
    /// 書籍が残っている場合は何も削除せず`AuthorHasBooks`を返す。
    pub async fn remove(&self, id: AuthorId) -> Result<()> {
        tracing::warn!(author_id = %id, "Attempting to delete author");

        // 1. 著者の存在確認
        self.store.get(id).await?;

        // 2. 削除ガード
        let has_books = self
            .books
            .exists_for_author(id)
            .await
            .map_err(CatalogApplicationError::BookReferenceError)?;

        if has_books {
            tracing::error!(author_id = %id, "Cannot delete author: has existing books");
            return Err(CatalogApplicationError::AuthorHasBooks(id));
        }

        // 3. 削除
        self.store.delete(id).await?;
        tracing::info!(author_id = %id, "Author deleted");
        Ok(())
    }

    /// 著者が存在するか確認する
    ///
    /// 存在しないIDに対してもエラーにはならず`false`を返す。
    pub async fn exists(&self, id: AuthorId) -> Result<bool> {
        tracing::debug!(author_id = %id, "Checking existence of author");
        self.store.exists(id).await
    }
}
