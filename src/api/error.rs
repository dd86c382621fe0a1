use crate::application::{CatalogApplicationError, ErrorKind};
use crate::domain::ValidationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーと入力検証エラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub enum ApiError {
    Application(CatalogApplicationError),
    Validation(ValidationError),
}

impl From<CatalogApplicationError> for ApiError {
    fn from(err: CatalogApplicationError) -> Self {
        ApiError::Application(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Application(err) => match err.kind() {
                // 404 Not Found - リクエストされたリソースが存在しない
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                // 409 Conflict - ISBNの一意性違反
                ErrorKind::Conflict => StatusCode::CONFLICT,
                // 400 Bad Request - 存在しない著者の参照、書籍が残る著者の削除
                ErrorKind::InvalidReference | ErrorKind::ReferentialBlock => {
                    StatusCode::BAD_REQUEST
                }
                // 500 Internal Server Error - システム障害
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            ApiError::Application(err) if err.kind() == ErrorKind::Internal => {
                tracing::error!(error = ?err, "Internal error: {}", err);
                "Internal server error".to_string()
            }
            ApiError::Application(err) => {
                tracing::warn!(status = status.as_u16(), "{}", err);
                err.to_string()
            }
            ApiError::Validation(err) => {
                tracing::warn!(status = status.as_u16(), "Validation failed: {}", err);
                err.to_string()
            }
        };

        let error = status.canonical_reason().unwrap_or("Error");
        let body = Json(ErrorResponse::new(status.as_u16(), message, error));
        (status, body).into_response()
    }
}
