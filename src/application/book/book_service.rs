use crate::domain::{AuthorId, BookDetails, BookFilter, BookId, BookPatch, NewBook, PageRequest, paginate};
use crate::ports::AuthorExistence;
use std::sync::Arc;

use super::book_store::BookStore;
use crate::application::errors::{CatalogApplicationError, Result};

/// 書籍整合性サービス
///
/// ISBNの一意性と著者参照の妥当性を担う。
/// 著者側への問い合わせは`AuthorExistence`ポート経由で行う。
///
/// # 一貫性保証
///
/// チェックと書き込みの間にはトランザクションがない（check-then-act）。
/// 同時リクエストでチェックをすり抜けた場合は、ストレージの一意制約・参照制約が
/// 違反を検出し、同じ業務エラーとして返される。
#[derive(Clone)]
pub struct BookService {
    store: BookStore,
    authors: Arc<dyn AuthorExistence>,
}

impl BookService {
    pub fn new(store: BookStore, authors: Arc<dyn AuthorExistence>) -> Self {
        Self { store, authors }
    }

    /// 書籍を登録する
    ///
    /// ビジネスルール（チェック順は固定）：
    /// 1. ISBNが未使用であること（違反時は`IsbnConflict`）
    /// 2. 著者が存在すること（違反時は`InvalidAuthorReference`）
    ///
    /// 成功時は著者を結合した書籍を返す。
    pub async fn create(&self, new_book: NewBook) -> Result<BookDetails> {
        tracing::info!(
            title = %new_book.title,
            isbn = %new_book.isbn,
            author_id = %new_book.author_id,
            "Creating book"
        );

        // 1. ISBNの一意性確認
        if self.store.isbn_in_use(&new_book.isbn).await? {
            tracing::warn!(isbn = %new_book.isbn, "Duplicate ISBN detected");
            return Err(CatalogApplicationError::IsbnConflict(new_book.isbn));
        }

        // 2. 著者の存在確認
        self.ensure_author_exists(new_book.author_id).await?;

        // 3. 保存
        let details = self.store.create(new_book).await?;
        tracing::info!(book_id = %details.book.id, "Book created");
        Ok(details)
    }

    /// 書籍一覧を取得する
    ///
    /// - `search`: タイトルまたはISBNに対する部分一致（大文字小文字を区別しない）
    /// - `author_id`: 著者による絞り込み
    ///
    /// 両方指定された場合はAND結合。ページングはフィルタ適用後に行う。
    pub async fn list(
        &self,
        page: PageRequest,
        search: Option<String>,
        author_id: Option<AuthorId>,
    ) -> Result<Vec<BookDetails>> {
        tracing::info!(
            page = ?page.page,
            limit = ?page.limit,
            search = ?search,
            author_id = ?author_id.map(|id| id.value()),
            "Fetching books"
        );
        self.store
            .list(BookFilter::new(search, author_id), paginate(page))
            .await
    }

    pub async fn get_by_id(&self, id: BookId) -> Result<BookDetails> {
        tracing::info!(book_id = %id, "Fetching book by ID");
        self.store.get(id).await
    }

    /// 書籍を部分更新する
    ///
    /// ビジネスルール：
    /// - 書籍が存在すること
    /// - ISBNを指定した場合、他の書籍で使用されていないこと（自身の現在のISBNは可）
    /// - 著者を指定した場合、その著者が存在すること
    pub async fn update(&self, id: BookId, patch: BookPatch) -> Result<BookDetails> {
        tracing::info!(book_id = %id, ?patch, "Updating book");

        // 1. 書籍の存在確認
        self.store.get(id).await?;

        // 2. ISBNの一意性確認（自身を除く）
        if let Some(isbn) = &patch.isbn {
            if self.store.isbn_in_use_by_other(isbn, id).await? {
                tracing::warn!(book_id = %id, isbn = %isbn, "ISBN conflict on update");
                return Err(CatalogApplicationError::IsbnConflict(isbn.clone()));
            }
        }

        // 3. 著者の存在確認
        if let Some(author_id) = patch.author_id {
            self.ensure_author_exists(author_id).await?;
        }

        // 4. 保存
        let details = self.store.update(id, patch).await?;
        tracing::info!(book_id = %details.book.id, "Book updated");
        Ok(details)
    }

    /// 書籍を削除する
    ///
    /// 他の集約の状態に関わらず削除できる。
    pub async fn remove(&self, id: BookId) -> Result<()> {
        tracing::warn!(book_id = %id, "Deleting book");
        self.store.get(id).await?;
        self.store.delete(id).await?;
        tracing::info!(book_id = %id, "Book deleted");
        Ok(())
    }

    /// 著者を参照する書籍が存在するか確認する
    pub async fn exists_for_author(&self, author_id: AuthorId) -> Result<bool> {
        tracing::debug!(author_id = %author_id, "Checking books for author");
        self.store.exists_for_author(author_id).await
    }

    async fn ensure_author_exists(&self, author_id: AuthorId) -> Result<()> {
        let exists = self
            .authors
            .exists(author_id)
            .await
            .map_err(CatalogApplicationError::AuthorExistenceError)?;

        if !exists {
            tracing::error!(author_id = %author_id, "Invalid authorId");
            return Err(CatalogApplicationError::InvalidAuthorReference(author_id));
        }
        Ok(())
    }
}
