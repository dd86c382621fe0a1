use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::{
    Author, AuthorId, AuthorPatch, BookDetails, BookPatch, Isbn, NewAuthor, NewBook, PageRequest,
    ValidationError, require_text,
};

// ============================================================================
// Query parameters
// ============================================================================

/// 著者一覧取得のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct ListAuthorsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// 名・姓の部分一致
    pub search: Option<String>,
}

impl ListAuthorsQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

/// 書籍一覧取得のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBooksQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// タイトル・ISBNの部分一致
    pub search: Option<String>,
    /// 著者IDでフィルタリング（空文字は条件なし）
    #[serde(default, deserialize_with = "empty_as_none")]
    pub author_id: Option<Uuid>,
}

/// 空文字のUUIDクエリパラメータを未指定として扱う
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Uuid::parse_str(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl ListBooksQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

// ============================================================================
// Request bodies
// ============================================================================

/// 項目の「未指定」と「null」を区別して受け取る
///
/// `#[serde(default)]`と組み合わせ、未指定は`None`、nullは`Some(None)`になる。
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// 必須項目の部分更新：nullは拒否する
fn required<T>(field: &'static str, value: Option<Option<T>>) -> Result<Option<T>, ValidationError> {
    match value {
        None => Ok(None),
        Some(None) => Err(ValidationError::NullField(field)),
        Some(Some(v)) => Ok(Some(v)),
    }
}

/// POST /v1/authors
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

impl CreateAuthorRequest {
    pub fn into_command(self) -> Result<NewAuthor, ValidationError> {
        NewAuthor::new(self.first_name, self.last_name, self.bio, self.birth_date)
    }
}

/// PATCH /v1/authors/:id
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthorRequest {
    #[serde(default, deserialize_with = "nullable")]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub birth_date: Option<Option<NaiveDate>>,
}

impl UpdateAuthorRequest {
    pub fn into_command(self) -> Result<AuthorPatch, ValidationError> {
        let first_name = required("firstName", self.first_name)?
            .map(|v| require_text("firstName", v))
            .transpose()?;
        let last_name = required("lastName", self.last_name)?
            .map(|v| require_text("lastName", v))
            .transpose()?;

        Ok(AuthorPatch {
            first_name,
            last_name,
            bio: self.bio,
            birth_date: self.birth_date,
        })
    }
}

/// POST /v1/books
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    pub title: String,
    pub isbn: String,
    #[serde(default)]
    pub published_date: Option<NaiveDate>,
    #[serde(default)]
    pub genre: Option<String>,
    pub author_id: Uuid,
}

impl CreateBookRequest {
    pub fn into_command(self) -> Result<NewBook, ValidationError> {
        NewBook::new(
            self.title,
            Isbn::parse(self.isbn)?,
            self.published_date,
            self.genre,
            AuthorId::from_uuid(self.author_id),
        )
    }
}

/// PATCH /v1/books/:id
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    #[serde(default, deserialize_with = "nullable")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub isbn: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub published_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "nullable")]
    pub genre: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub author_id: Option<Option<Uuid>>,
}

impl UpdateBookRequest {
    pub fn into_command(self) -> Result<BookPatch, ValidationError> {
        let title = required("title", self.title)?
            .map(|v| require_text("title", v))
            .transpose()?;
        let isbn = required("isbn", self.isbn)?
            .map(|v| Isbn::parse(v))
            .transpose()?;
        let author_id = required("authorId", self.author_id)?.map(AuthorId::from_uuid);

        Ok(BookPatch {
            title,
            isbn,
            published_date: self.published_date,
            genre: self.genre,
            author_id,
        })
    }
}

// ============================================================================
// Responses
// ============================================================================

/// 日付をYYYY-MM-DD形式の文字列に変換する（nullはそのまま）
pub fn format_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

/// 著者レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub birth_date: Option<String>,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            id: author.id.value(),
            first_name: author.first_name,
            last_name: author.last_name,
            bio: author.bio,
            birth_date: format_date(author.birth_date),
        }
    }
}

/// 書籍レスポンス
///
/// 著者が結合できた場合のみ`author`を含める。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: Uuid,
    pub title: String,
    pub isbn: String,
    pub published_date: Option<String>,
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorResponse>,
}

impl From<BookDetails> for BookResponse {
    fn from(details: BookDetails) -> Self {
        let BookDetails { book, author } = details;
        Self {
            id: book.id.value(),
            title: book.title,
            isbn: book.isbn.as_str().to_string(),
            published_date: format_date(book.published_date),
            genre: book.genre,
            author: author.map(AuthorResponse::from),
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    pub message: String,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(status_code: u16, message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            error: error.into(),
        }
    }
}
