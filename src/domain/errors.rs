use thiserror::Error;

/// 入力値の検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 必須項目が空
    #[error("{0} should not be empty")]
    EmptyField(&'static str),

    /// 必須項目にnullが指定された
    #[error("{0} cannot be null")]
    NullField(&'static str),

    /// ISBNの形式が不正
    #[error("isbn must be an ISBN: {0}")]
    InvalidIsbn(String),
}

/// 必須テキスト項目の検証
///
/// 前後の空白を除いて空であれば`EmptyField`を返す。値はそのまま返す。
pub fn require_text(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(value)
}
