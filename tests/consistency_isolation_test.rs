use async_trait::async_trait;
use rusty_library_catalog::adapters::memory::{self, MemoryStore};
use rusty_library_catalog::adapters::mock;
use rusty_library_catalog::application::{
    AuthorService, AuthorStore, BookService, BookStore, CatalogApplicationError, CatalogServices,
};
use rusty_library_catalog::domain::{
    AuthorId, BookDetails, BookFilter, BookId, BookPatch, Isbn, NewBook, PageRequest, Pagination,
};
use rusty_library_catalog::ports::{BookRepository, repository_error};
use std::sync::Arc;

mod common;

use common::{isbn, new_author, new_book};

// ============================================================================
// モックを使ったセットアップ
// ============================================================================

/// 書籍サービスを著者側のモックと組み合わせる
///
/// 書籍の保存先はインメモリストア、著者の存在確認はモックが答える。
fn book_service_with_mock(
    store: &MemoryStore,
    authors: Arc<mock::AuthorExistence>,
) -> BookService {
    BookService::new(BookStore::new(Arc::new(store.book_repository())), authors)
}

/// 著者サービスを書籍側のモックと組み合わせる
fn author_service_with_mock(
    store: &MemoryStore,
    books: Arc<mock::BookExistenceForAuthor>,
) -> AuthorService {
    AuthorService::new(AuthorStore::new(Arc::new(store.author_repository())), books)
}

/// ISBNの存在確認だけが常に「未使用」と答える書籍リポジトリ
///
/// 事前チェックの後に別のリクエストが同じISBNを書き込んだ状況を再現する。
/// 書き込みはインメモリ実装に委譲するため、一意制約はそちらで検出される。
struct StaleIsbnLookup {
    inner: memory::BookRepository,
}

#[async_trait]
impl BookRepository for StaleIsbnLookup {
    async fn insert(&self, new_book: NewBook) -> repository_error::Result<BookDetails> {
        self.inner.insert(new_book).await
    }

    async fn find_by_id(&self, id: BookId) -> repository_error::Result<Option<BookDetails>> {
        self.inner.find_by_id(id).await
    }

    async fn find_many(
        &self,
        filter: BookFilter,
        pagination: Pagination,
    ) -> repository_error::Result<Vec<BookDetails>> {
        self.inner.find_many(filter, pagination).await
    }

    async fn update_by_id(
        &self,
        id: BookId,
        patch: BookPatch,
    ) -> repository_error::Result<Option<BookDetails>> {
        self.inner.update_by_id(id, patch).await
    }

    async fn delete_by_id(&self, id: BookId) -> repository_error::Result<bool> {
        self.inner.delete_by_id(id).await
    }

    async fn exists_by_isbn(&self, _isbn: &Isbn) -> repository_error::Result<bool> {
        Ok(false)
    }

    async fn exists_by_isbn_excluding(
        &self,
        _isbn: &Isbn,
        _excluded: BookId,
    ) -> repository_error::Result<bool> {
        Ok(false)
    }

    async fn exists_by_author(&self, author_id: AuthorId) -> repository_error::Result<bool> {
        self.inner.exists_by_author(author_id).await
    }
}

// ============================================================================
// 書籍サービス
// ============================================================================

#[tokio::test]
async fn test_isbn_is_checked_before_author_probe() {
    let store = MemoryStore::new();
    let author_probe = Arc::new(mock::AuthorExistence::new());
    let books = book_service_with_mock(&store, author_probe.clone());

    // 既存の書籍は本物の著者で登録しておく
    let author_service =
        author_service_with_mock(&store, Arc::new(mock::BookExistenceForAuthor::new()));
    let author = author_service.create(new_author("Frank", "Herbert")).await.unwrap();
    author_probe.add_author(author.id);
    books
        .create(new_book("Dune", isbn("0-441-17271-7"), author.id))
        .await
        .unwrap();
    assert_eq!(author_probe.calls(), 1);

    let err = books
        .create(new_book("Copy", isbn("0-441-17271-7"), AuthorId::new()))
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogApplicationError::IsbnConflict(_)));
    // 重複ISBNの時点で打ち切られ、著者の確認は行われない
    assert_eq!(author_probe.calls(), 1);
}

#[tokio::test]
async fn test_unknown_author_reported_by_probe() {
    let store = MemoryStore::new();
    let author_probe = Arc::new(mock::AuthorExistence::new());
    let books = book_service_with_mock(&store, author_probe.clone());

    let err = books
        .create(new_book("Orphan", isbn("0-8044-2957-X"), AuthorId::new()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CatalogApplicationError::InvalidAuthorReference(_)
    ));
    assert_eq!(author_probe.calls(), 1);

    let listed = books
        .list(PageRequest::default(), None, None)
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_update_without_author_change_skips_probe() {
    let store = MemoryStore::new();
    let author_probe = Arc::new(mock::AuthorExistence::new());
    let books = book_service_with_mock(&store, author_probe.clone());

    let author_service =
        author_service_with_mock(&store, Arc::new(mock::BookExistenceForAuthor::new()));
    let author = author_service.create(new_author("Frank", "Herbert")).await.unwrap();
    author_probe.add_author(author.id);
    let created = books
        .create(new_book("Dune", isbn("0-441-17271-7"), author.id))
        .await
        .unwrap();

    books
        .update(
            created.book.id,
            BookPatch {
                genre: Some(Some("Science Fiction".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(author_probe.calls(), 1);
}

// ============================================================================
// 著者サービス
// ============================================================================

#[tokio::test]
async fn test_remove_blocked_while_probe_reports_books() {
    let store = MemoryStore::new();
    let book_probe = Arc::new(mock::BookExistenceForAuthor::new());
    let authors = author_service_with_mock(&store, book_probe.clone());

    let author = authors.create(new_author("Ursula", "Le Guin")).await.unwrap();
    book_probe.add_reference(author.id);

    let err = authors.remove(author.id).await.unwrap_err();
    assert!(matches!(err, CatalogApplicationError::AuthorHasBooks(_)));
    assert!(authors.exists(author.id).await.unwrap());

    book_probe.clear_references(author.id);
    authors.remove(author.id).await.unwrap();
    assert!(!authors.exists(author.id).await.unwrap());
}

#[tokio::test]
async fn test_remove_unknown_author_is_not_found() {
    let store = MemoryStore::new();
    let book_probe = Arc::new(mock::BookExistenceForAuthor::new());
    let authors = author_service_with_mock(&store, book_probe.clone());

    let unknown = AuthorId::new();
    book_probe.add_reference(unknown);

    let err = authors.remove(unknown).await.unwrap_err();
    assert!(matches!(err, CatalogApplicationError::AuthorNotFound(id) if id == unknown));
}

// ============================================================================
// ストレージ制約による検出
// ============================================================================

#[tokio::test]
async fn test_missing_author_caught_by_store_on_create() {
    let store = MemoryStore::new();
    let author_probe = Arc::new(mock::AuthorExistence::new());
    let books = book_service_with_mock(&store, author_probe.clone());

    // 存在確認は通るが、ストアには著者がいない
    let ghost = AuthorId::new();
    author_probe.add_author(ghost);

    let err = books
        .create(new_book("Ghost", isbn("0-441-17271-7"), ghost))
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogApplicationError::InvalidAuthorReference(id) if id == ghost));
    assert_eq!(author_probe.calls(), 1);
    let listed = books
        .list(PageRequest::default(), None, None)
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_missing_author_caught_by_store_on_update() {
    let store = MemoryStore::new();
    let author_probe = Arc::new(mock::AuthorExistence::new());
    let books = book_service_with_mock(&store, author_probe.clone());

    let authors =
        author_service_with_mock(&store, Arc::new(mock::BookExistenceForAuthor::new()));
    let author = authors.create(new_author("Frank", "Herbert")).await.unwrap();
    author_probe.add_author(author.id);
    let created = books
        .create(new_book("Dune", isbn("0-441-17271-7"), author.id))
        .await
        .unwrap();

    let ghost = AuthorId::new();
    author_probe.add_author(ghost);

    let err = books
        .update(
            created.book.id,
            BookPatch {
                author_id: Some(ghost),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogApplicationError::InvalidAuthorReference(id) if id == ghost));
    let unchanged = books.get_by_id(created.book.id).await.unwrap();
    assert_eq!(unchanged.book.author_id, author.id);
}

#[tokio::test]
async fn test_referenced_author_caught_by_store_on_remove() {
    let store = MemoryStore::new();
    let services = CatalogServices::new(
        Arc::new(store.author_repository()),
        Arc::new(store.book_repository()),
    );
    let author = services.authors.create(new_author("Ursula", "Le Guin")).await.unwrap();
    services
        .books
        .create(new_book("A Wizard of Earthsea", isbn("0-306-40615-2"), author.id))
        .await
        .unwrap();

    // 書籍なしと答えるモックで削除ガードをすり抜ける
    let authors =
        author_service_with_mock(&store, Arc::new(mock::BookExistenceForAuthor::new()));

    let err = authors.remove(author.id).await.unwrap_err();

    assert!(matches!(err, CatalogApplicationError::AuthorHasBooks(id) if id == author.id));
    assert!(authors.exists(author.id).await.unwrap());
    assert!(services.books.exists_for_author(author.id).await.unwrap());
}

#[tokio::test]
async fn test_duplicate_isbn_caught_by_store() {
    let store = MemoryStore::new();
    let author_probe = Arc::new(mock::AuthorExistence::new());
    let books = BookService::new(
        BookStore::new(Arc::new(StaleIsbnLookup {
            inner: store.book_repository(),
        })),
        author_probe.clone(),
    );

    let authors =
        author_service_with_mock(&store, Arc::new(mock::BookExistenceForAuthor::new()));
    let author = authors.create(new_author("Frank", "Herbert")).await.unwrap();
    author_probe.add_author(author.id);

    books
        .create(new_book("Dune", isbn("0-441-17271-7"), author.id))
        .await
        .unwrap();
    let second = books
        .create(new_book("Dune Messiah", isbn("0-7475-3269-9"), author.id))
        .await
        .unwrap();

    let err = books
        .create(new_book("Copy", isbn("0-441-17271-7"), author.id))
        .await
        .unwrap_err();
    assert!(matches!(&err, CatalogApplicationError::IsbnConflict(i) if i.as_str() == "0-441-17271-7"));

    let err = books
        .update(
            second.book.id,
            BookPatch {
                isbn: Some(isbn("0-441-17271-7")),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogApplicationError::IsbnConflict(_)));

    let listed = books
        .list(PageRequest::default(), None, None)
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);
    let unchanged = books.get_by_id(second.book.id).await.unwrap();
    assert_eq!(unchanged.book.isbn.as_str(), "0-7475-3269-9");
}
