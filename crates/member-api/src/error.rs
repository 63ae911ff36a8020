use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use member_core::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UserNotFound(_) | DomainError::PhotoNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            DomainError::AlreadyMainPhoto
            | DomainError::CannotDeleteMainPhoto
            | DomainError::MediaService(_)
            | DomainError::SaveFailed(_)
            | DomainError::ValidationError(_) => ApiError::BadRequest(err.to_string()),
            DomainError::DatabaseError(msg) => ApiError::DatabaseError(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, "Unauthorized", msg)
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NotFound", msg)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BadRequest", msg)
            }
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                // storage details stay in the log
                (StatusCode::INTERNAL_SERVER_ERROR, "DatabaseError", "Database error".to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
