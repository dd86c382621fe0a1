use crate::domain::AuthorId;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 著者参照確認ポート
///
/// 著者サービスが書籍サービスの具象型に依存しないための境界。
#[async_trait]
pub trait BookExistenceForAuthor: Send + Sync {
    /// 著者を参照する書籍が存在するか確認する
    ///
    /// ビジネスルール: 書籍から参照されている著者は削除できない。
    async fn exists_for_author(&self, author_id: AuthorId) -> Result<bool>;
}
