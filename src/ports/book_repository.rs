use crate::domain::{AuthorId, BookDetails, BookFilter, BookId, BookPatch, Isbn, NewBook, Pagination};
use async_trait::async_trait;

use super::repository_error::Result;

/// 書籍リポジトリポート
///
/// 読み取り操作は参照先の著者を結合した`BookDetails`を返す。
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// 書籍を保存し、著者を結合した結果を返す
    async fn insert(&self, new_book: NewBook) -> Result<BookDetails>;

    /// IDで書籍を取得する
    async fn find_by_id(&self, id: BookId) -> Result<Option<BookDetails>>;

    /// 条件に一致する書籍を取得する
    ///
    /// フィルタ適用後に、登録順でoffset/limitを適用する。
    async fn find_many(
        &self,
        filter: BookFilter,
        pagination: Pagination,
    ) -> Result<Vec<BookDetails>>;

    /// 指定された項目のみ更新する
    async fn update_by_id(&self, id: BookId, patch: BookPatch) -> Result<Option<BookDetails>>;

    /// 書籍を削除する
    async fn delete_by_id(&self, id: BookId) -> Result<bool>;

    /// ISBNが使用済みか確認する
    async fn exists_by_isbn(&self, isbn: &Isbn) -> Result<bool>;

    /// 指定した書籍以外でISBNが使用済みか確認する（更新時の一意性チェック用）
    async fn exists_by_isbn_excluding(&self, isbn: &Isbn, excluded: BookId) -> Result<bool>;

    /// 著者を参照している書籍が1冊以上あるか確認する
    async fn exists_by_author(&self, author_id: AuthorId) -> Result<bool>;
}
