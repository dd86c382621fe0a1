use crate::domain::AuthorId;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 著者存在確認ポート
///
/// 書籍サービスが著者サービスの具象型に依存しないための境界。
/// 書籍は著者IDのみを知り、著者の詳細は知らない。
#[async_trait]
pub trait AuthorExistence: Send + Sync {
    /// 著者が存在するか確認する
    ///
    /// 書籍の登録・著者変更前の参照チェックに使用される。
    /// 存在しない場合はエラーではなく`false`を返す。
    async fn exists(&self, author_id: AuthorId) -> Result<bool>;
}
