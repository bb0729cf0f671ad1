/// Error types for the discussion service
///
/// Errors are converted to JSON HTTP responses for API clients.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Result type for discussion-service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Store failures stay generic on the wire; the details go to the log.
        let message = match self {
            AppError::Database(e) => {
                tracing::error!("database error: {}", e);
                "internal server error".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("internal error: {}", e);
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(status).json(serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        }))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<token_auth::TokenError> for AppError {
    fn from(err: token_auth::TokenError) -> Self {
        AppError::Unauthorized(err.to_string())
    }
}
