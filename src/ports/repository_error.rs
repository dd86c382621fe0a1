use thiserror::Error;

/// ストレージアダプターのエラー
///
/// 一意制約・参照制約の違反はアプリケーション層で業務エラーに変換できるよう
/// 型として区別する。
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// 一意制約違反（例: books.isbn）
    #[error("Unique constraint violated on {field}")]
    UniqueViolation { field: &'static str },

    /// 参照制約違反（例: books.author_id → authors.id）
    #[error("Foreign key constraint violated")]
    ForeignKeyViolation,

    /// 保存済みデータの形式が不正
    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    /// その他のバックエンドエラー
    #[error("Storage backend error")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // PostgreSQLのSQLSTATE: 23505 = unique_violation, 23503 = foreign_key_violation
            match db_err.code().as_deref() {
                Some("23505") => {
                    return RepositoryError::UniqueViolation {
                        field: unique_field(db_err.constraint()),
                    };
                }
                Some("23503") => return RepositoryError::ForeignKeyViolation,
                _ => {}
            }
        }
        RepositoryError::Backend(Box::new(err))
    }
}

fn unique_field(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("books_isbn_key") => "isbn",
        _ => "unknown",
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
