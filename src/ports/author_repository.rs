use crate::domain::{Author, AuthorFilter, AuthorId, AuthorPatch, NewAuthor, Pagination};
use async_trait::async_trait;

use super::repository_error::Result;

/// 著者リポジトリポート
///
/// 著者の永続化を抽象化する。1行単位の操作のみを提供し、
/// 書籍との整合性はアプリケーション層が保証する。
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// 著者を保存し、IDが割り当てられた著者を返す
    async fn insert(&self, new_author: NewAuthor) -> Result<Author>;

    /// IDで著者を取得する
    async fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>>;

    /// 条件に一致する著者を取得する
    ///
    /// 登録順（created_at, id）で並べ、offset/limitで切り出す。
    async fn find_many(&self, filter: AuthorFilter, pagination: Pagination) -> Result<Vec<Author>>;

    /// 指定された項目のみ更新する
    ///
    /// 著者が存在しない場合は`None`を返す。
    async fn update_by_id(&self, id: AuthorId, patch: AuthorPatch) -> Result<Option<Author>>;

    /// 著者を削除する
    ///
    /// 削除した場合は`true`、存在しなかった場合は`false`を返す。
    async fn delete_by_id(&self, id: AuthorId) -> Result<bool>;

    /// 著者が存在するか確認する
    async fn exists_by_id(&self, id: AuthorId) -> Result<bool>;
}
