// personal-task/src/error.rs

use crate::types::ApiResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DbErr(#[from] DbErr),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::DbErr(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

// axum でエラーをエンベロープ形式のHTTPレスポンスに変換する
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (message, error) = match self {
            AppError::DbErr(db_err) => {
                // サーバーログには詳細を出し、クライアントには出さない
                tracing::error!(error = ?db_err, "Database error");
                ("A database error occurred".to_string(), None)
            }
            AppError::InvalidInput(message) => ("Invalid input".to_string(), Some(message)),
            AppError::NotFound(message) => ("Resource not found".to_string(), Some(message)),
            AppError::Unauthorized(message) => ("Unauthorized".to_string(), Some(message)),
            AppError::InternalServerError(message) => {
                tracing::error!(error = %message, "Internal server error");
                ("An internal server error occurred".to_string(), None)
            }
        };

        ApiResponse::error(status, message, error).into_response()
    }
}

// Result 型のエイリアス
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::InvalidInput("month".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("category".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Unauthorized("token".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::DbErr(DbErr::Custom("down".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_db_error_is_opaque() {
        let response = AppError::DbErr(DbErr::Custom("connection refused".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
