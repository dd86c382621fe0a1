use crate::domain::{
    AuthorId, Book, BookDetails, BookFilter, BookId, BookPatch, Isbn, NewBook, Pagination,
};
use crate::ports::book_repository::BookRepository as BookRepositoryTrait;
use crate::ports::repository_error::{RepositoryError, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};
use uuid::Uuid;

use super::author_repository::map_row_to_author;
use super::{like_pattern, to_bigint};

/// 書籍列と、結合した著者列（`a_`接頭辞）
const BOOK_DETAILS_COLUMNS: &str = r#"
    b.id, b.title, b.isbn, b.published_date, b.genre, b.author_id, b.created_at, b.updated_at,
    a.id AS a_id, a.first_name AS a_first_name, a.last_name AS a_last_name,
    a.bio AS a_bio, a.birth_date AS a_birth_date,
    a.created_at AS a_created_at, a.updated_at AS a_updated_at
"#;

const AUTHOR_JOIN: &str = "LEFT JOIN authors a ON a.id = b.author_id";

/// PostgreSQLの行データをBookDetailsに変換する
///
/// 保存済みのisbnはISBNとして再検証し、不正な場合は`InvalidData`とする。
/// 著者が結合できなかった行は`author: None`になる。
fn map_row_to_book_details(row: &PgRow) -> Result<BookDetails> {
    let isbn_str: String = row.try_get("isbn")?;
    let isbn = Isbn::parse(isbn_str).map_err(|e| RepositoryError::InvalidData(e.to_string()))?;

    let book = Book {
        id: BookId::from_uuid(row.try_get("id")?),
        title: row.try_get("title")?,
        isbn,
        published_date: row.try_get("published_date")?,
        genre: row.try_get("genre")?,
        author_id: AuthorId::from_uuid(row.try_get("author_id")?),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    };

    let joined_author: Option<Uuid> = row.try_get("a_id")?;
    let author = match joined_author {
        Some(_) => Some(map_row_to_author(row, "a_")?),
        None => None,
    };

    Ok(BookDetails { book, author })
}

/// BookRepositoryのPostgreSQL実装
///
/// isbnのUNIQUE制約と著者への外部キーはスキーマで定義されており、
/// 違反は`RepositoryError`の各バリアントとして返る。
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    /// PostgreSQLコネクションプールから新しいBookRepositoryを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    /// INSERTと著者の結合を1文で行う
    async fn insert(&self, new_book: NewBook) -> Result<BookDetails> {
        let book = Book::create(new_book, Utc::now());

        let row = sqlx::query(&format!(
            r#"
            WITH b AS (
                INSERT INTO books (
                    id, title, isbn, published_date, genre, author_id, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING *
            )
            SELECT {BOOK_DETAILS_COLUMNS}
            FROM b {AUTHOR_JOIN}
            "#
        ))
        .bind(book.id.value())
        .bind(&book.title)
        .bind(book.isbn.as_str())
        .bind(book.published_date)
        .bind(&book.genre)
        .bind(book.author_id.value())
        .bind(book.created_at)
        .bind(book.updated_at)
        .fetch_one(&self.pool)
        .await?;

        map_row_to_book_details(&row)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<BookDetails>> {
        let row = sqlx::query(&format!(
            "SELECT {BOOK_DETAILS_COLUMNS} FROM books b {AUTHOR_JOIN} WHERE b.id = $1"
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_book_details).transpose()
    }

    /// (タイトル OR ISBN) AND 著者 で絞り込み、登録順でページングする
    async fn find_many(
        &self,
        filter: BookFilter,
        pagination: Pagination,
    ) -> Result<Vec<BookDetails>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {BOOK_DETAILS_COLUMNS} FROM books b {AUTHOR_JOIN} WHERE TRUE"
        ));

        if let Some(search) = &filter.search {
            let pattern = like_pattern(search);
            builder
                .push(" AND (b.title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR b.isbn ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(author_id) = filter.author_id {
            builder
                .push(" AND b.author_id = ")
                .push_bind(author_id.value());
        }

        builder
            .push(" ORDER BY b.created_at, b.id LIMIT ")
            .push_bind(to_bigint(pagination.limit))
            .push(" OFFSET ")
            .push_bind(to_bigint(pagination.offset));

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.iter().map(map_row_to_book_details).collect()
    }

    async fn update_by_id(&self, id: BookId, patch: BookPatch) -> Result<Option<BookDetails>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("WITH b AS (UPDATE books SET updated_at = ");
        builder.push_bind(Utc::now());

        if let Some(title) = patch.title {
            builder.push(", title = ").push_bind(title);
        }
        if let Some(isbn) = patch.isbn {
            builder.push(", isbn = ").push_bind(isbn.as_str().to_string());
        }
        if let Some(published_date) = patch.published_date {
            builder.push(", published_date = ").push_bind(published_date);
        }
        if let Some(genre) = patch.genre {
            builder.push(", genre = ").push_bind(genre);
        }
        if let Some(author_id) = patch.author_id {
            builder.push(", author_id = ").push_bind(author_id.value());
        }

        builder
            .push(" WHERE id = ")
            .push_bind(id.value())
            .push(format!(
                " RETURNING *) SELECT {BOOK_DETAILS_COLUMNS} FROM b {AUTHOR_JOIN}"
            ));

        let row = builder.build().fetch_optional(&self.pool).await?;
        row.as_ref().map(map_row_to_book_details).transpose()
    }

    async fn delete_by_id(&self, id: BookId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_isbn(&self, isbn: &Isbn) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM books WHERE isbn = $1)")
            .bind(isbn.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn exists_by_isbn_excluding(&self, isbn: &Isbn, excluded: BookId) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM books WHERE isbn = $1 AND id <> $2)",
        )
        .bind(isbn.as_str())
        .bind(excluded.value())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_author(&self, author_id: AuthorId) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM books WHERE author_id = $1)")
                .bind(author_id.value())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}
