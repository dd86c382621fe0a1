use crate::application::CatalogServices;
use crate::domain::{AuthorId, BookId};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use super::{
    error::ApiError,
    types::{
        AuthorResponse, BookResponse, CreateAuthorRequest, CreateBookRequest, ListAuthorsQuery,
        ListBooksQuery, UpdateAuthorRequest, UpdateBookRequest,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub services: CatalogServices,
}

// ============================================================================
// Author handlers
// ============================================================================

/// POST /v1/authors - 著者を登録
pub async fn create_author(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateAuthorRequest>,
) -> Result<(StatusCode, Json<AuthorResponse>), ApiError> {
    let cmd = req.into_command()?;
    let author = state.services.authors.create(cmd).await?;
    Ok((StatusCode::CREATED, Json(AuthorResponse::from(author))))
}

/// GET /v1/authors - 著者一覧
///
/// クエリパラメータ:
/// - page: ページ番号（既定値1）
/// - limit: 1ページあたりの件数（既定値10）
/// - search: 名・姓の部分一致（大文字小文字を区別しない）
pub async fn list_authors(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListAuthorsQuery>,
) -> Result<Json<Vec<AuthorResponse>>, ApiError> {
    let page = query.page_request();
    let authors = state.services.authors.list(page, query.search).await?;
    Ok(Json(authors.into_iter().map(AuthorResponse::from).collect()))
}

/// GET /v1/authors/:id - 著者詳細
pub async fn get_author(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AuthorResponse>, ApiError> {
    let author = state
        .services
        .authors
        .get_by_id(AuthorId::from_uuid(id))
        .await?;
    Ok(Json(AuthorResponse::from(author)))
}

/// PATCH /v1/authors/:id - 著者を部分更新
pub async fn update_author(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAuthorRequest>,
) -> Result<Json<AuthorResponse>, ApiError> {
    let patch = req.into_command()?;
    let author = state
        .services
        .authors
        .update(AuthorId::from_uuid(id), patch)
        .await?;
    Ok(Json(AuthorResponse::from(author)))
}

/// DELETE /v1/authors/:id - 著者を削除
///
/// 書籍から参照されている著者は削除できない（400）。
pub async fn delete_author(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .services
        .authors
        .remove(AuthorId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Book handlers
// ============================================================================

/// POST /v1/books - 書籍を登録
///
/// 強制されるビジネスルール:
/// - ISBNが他の書籍で使用されていないこと（409）
/// - 著者が存在すること（400）
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let cmd = req.into_command()?;
    let book = state.services.books.create(cmd).await?;
    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

/// GET /v1/books - 書籍一覧
///
/// クエリパラメータ:
/// - page, limit: ページング
/// - search: タイトル・ISBNの部分一致
/// - authorId: 著者でフィルタリング（searchとはAND結合）
pub async fn list_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBooksQuery>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let page = query.page_request();
    let author_id = query.author_id.map(AuthorId::from_uuid);
    let books = state
        .services
        .books
        .list(page, query.search, author_id)
        .await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// GET /v1/books/:id - 書籍詳細（著者を含む）
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = state.services.books.get_by_id(BookId::from_uuid(id)).await?;
    Ok(Json(BookResponse::from(book)))
}

/// PATCH /v1/books/:id - 書籍を部分更新
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBookRequest>,
) -> Result<Json<BookResponse>, ApiError> {
    let patch = req.into_command()?;
    let book = state
        .services
        .books
        .update(BookId::from_uuid(id), patch)
        .await?;
    Ok(Json(BookResponse::from(book)))
}

/// DELETE /v1/books/:id - 書籍を削除
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.services.books.remove(BookId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
