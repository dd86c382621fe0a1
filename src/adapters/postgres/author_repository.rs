use crate::domain::{Author, AuthorFilter, AuthorId, AuthorPatch, NewAuthor, Pagination};
use crate::ports::author_repository::AuthorRepository as AuthorRepositoryTrait;
use crate::ports::repository_error::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};

use super::{like_pattern, to_bigint};

const AUTHOR_COLUMNS: &str = "id, first_name, last_name, bio, birth_date, created_at, updated_at";

/// PostgreSQLの行データをAuthorに変換する
///
/// `prefix`は結合クエリで列名に付けた別名の接頭辞（例: 書籍と結合する場合の`a_`）。
pub(crate) fn map_row_to_author(row: &PgRow, prefix: &str) -> Result<Author> {
    let column = |name: &str| format!("{prefix}{name}");

    Ok(Author {
        id: AuthorId::from_uuid(row.try_get(column("id").as_str())?),
        first_name: row.try_get(column("first_name").as_str())?,
        last_name: row.try_get(column("last_name").as_str())?,
        bio: row.try_get(column("bio").as_str())?,
        birth_date: row.try_get(column("birth_date").as_str())?,
        created_at: row.try_get(column("created_at").as_str())?,
        updated_at: row.try_get(column("updated_at").as_str())?,
    })
}

/// AuthorRepositoryのPostgreSQL実装
pub struct AuthorRepository {
    pool: PgPool,
}

impl AuthorRepository {
    /// PostgreSQLコネクションプールから新しいAuthorRepositoryを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorRepositoryTrait for AuthorRepository {
    async fn insert(&self, new_author: NewAuthor) -> Result<Author> {
        let author = Author::create(new_author, Utc::now());

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO authors (id, first_name, last_name, bio, birth_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {AUTHOR_COLUMNS}
            "#
        ))
        .bind(author.id.value())
        .bind(&author.first_name)
        .bind(&author.last_name)
        .bind(&author.bio)
        .bind(author.birth_date)
        .bind(author.created_at)
        .bind(author.updated_at)
        .fetch_one(&self.pool)
        .await?;

        map_row_to_author(&row, "")
    }

    async fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>> {
        let row = sqlx::query(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors WHERE id = $1"
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(|r| map_row_to_author(r, "")).transpose()
    }

    /// 名・姓に対するILIKE検索（OR）、登録順
    async fn find_many(&self, filter: AuthorFilter, pagination: Pagination) -> Result<Vec<Author>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {AUTHOR_COLUMNS} FROM authors"));

        if let Some(search) = &filter.search {
            let pattern = like_pattern(search);
            builder
                .push(" WHERE (first_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR last_name ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        builder
            .push(" ORDER BY created_at, id LIMIT ")
            .push_bind(to_bigint(pagination.limit))
            .push(" OFFSET ")
            .push_bind(to_bigint(pagination.offset));

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.iter().map(|r| map_row_to_author(r, "")).collect()
    }

    /// 指定された列のみをSETする
    async fn update_by_id(&self, id: AuthorId, patch: AuthorPatch) -> Result<Option<Author>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE authors SET updated_at = ");
        builder.push_bind(Utc::now());

        if let Some(first_name) = patch.first_name {
            builder.push(", first_name = ").push_bind(first_name);
        }
        if let Some(last_name) = patch.last_name {
            builder.push(", last_name = ").push_bind(last_name);
        }
        if let Some(bio) = patch.bio {
            builder.push(", bio = ").push_bind(bio);
        }
        if let Some(birth_date) = patch.birth_date {
            builder.push(", birth_date = ").push_bind(birth_date);
        }

        builder
            .push(" WHERE id = ")
            .push_bind(id.value())
            .push(format!(" RETURNING {AUTHOR_COLUMNS}"));

        let row = builder.build().fetch_optional(&self.pool).await?;
        row.as_ref().map(|r| map_row_to_author(r, "")).transpose()
    }

    /// books.author_idの外部キー（ON DELETE RESTRICT）に阻まれた場合は
    /// `ForeignKeyViolation`になる
    async fn delete_by_id(&self, id: AuthorId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_id(&self, id: AuthorId) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM authors WHERE id = $1)")
            .bind(id.value())
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }
}
