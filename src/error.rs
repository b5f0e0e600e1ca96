use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No such home: '{0}'")]
    HomeNotFound(String),

    #[error("Home '{0}' already exists")]
    HomeAlreadyExists(String),

    #[error("Home limit reached ({0})")]
    HomeLimitReached(i32),

    #[error("Home limit is unlimited; adjustment has no effect")]
    LimitUnchanged,

    #[error("Storage failure: {0}")]
    StorageFailure(String),
}

/// Implement IntoResponse to convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Config(ref msg) => {
                tracing::error!("Configuration error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::StorageFailure(ref op) => {
                tracing::error!("Storage failure during {}", op);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to save, check server logs".to_string(),
                )
            }
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::HomeNotFound(ref name) => (
                StatusCode::NOT_FOUND,
                format!("No such home: '{}'", name),
            ),
            AppError::HomeAlreadyExists(ref name) => (
                StatusCode::CONFLICT,
                format!(
                    "Home '{}' already exists. Use another name or delete it first",
                    name
                ),
            ),
            AppError::HomeLimitReached(limit) => (
                StatusCode::FORBIDDEN,
                format!("Home limit reached ({})", limit),
            ),
            AppError::LimitUnchanged => (
                StatusCode::CONFLICT,
                "Home limit is unlimited; this command has no effect".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::InvalidInput("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::HomeNotFound("base".into()), StatusCode::NOT_FOUND),
            (AppError::HomeAlreadyExists("base".into()), StatusCode::CONFLICT),
            (AppError::HomeLimitReached(3), StatusCode::FORBIDDEN),
            (AppError::LimitUnchanged, StatusCode::CONFLICT),
            (
                AppError::StorageFailure("create".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Database(sqlx::Error::RowNotFound),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
