use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use wayfarer_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    AuthenticationError(String),
    #[error("{0}")]
    NotFoundError(String),
    #[error("{message}: {detail}")]
    InternalServerError {
        message: &'static str,
        detail: String,
    },
}

impl AppError {
    /// Classify a domain error. Anything unclassified becomes a 500 carrying `fallback` as
    /// its public message; the underlying detail only goes to the log.
    pub fn from_core(err: CoreError, fallback: &'static str) -> Self {
        match err {
            CoreError::DuplicateEmail | CoreError::InvalidCredentials => {
                AppError::ValidationError(err.to_string())
            }
            CoreError::MissingToken => AppError::AuthenticationError(err.to_string()),
            CoreError::InvalidToken(detail) => {
                tracing::debug!("Rejected bearer token: {}", detail);
                AppError::AuthenticationError("Invalid token".to_string())
            }
            CoreError::NotFound => AppError::NotFoundError(err.to_string()),
            CoreError::Storage(_) | CoreError::InternalError(_) => AppError::InternalServerError {
                message: fallback,
                detail: err.to_string(),
            },
        }
    }

    pub fn route_not_found() -> Self {
        AppError::NotFoundError("Route not found".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InternalServerError { message, detail } => {
                tracing::error!("Internal Server Error: {}: {}", message, detail);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}
