//! Error handling module
//!
//! Every non-success outcome of a handler is an [`AppError`]; its
//! `IntoResponse` impl decides the status and payload the client sees.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use deadpool_postgres::PoolError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::db::StoreError;
use crate::models::{ErrorListResponse, MessageResponse};

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("id should be a number")]
    InvalidId,

    #[error("Invalid dog: {}", .0.join(", "))]
    InvalidDog(Vec<String>),

    /// Unknown keys in a PATCH body. Answered with 404, not 400.
    #[error("Invalid update: {}", .0.join(", "))]
    InvalidUpdate(Vec<String>),

    #[error("Dog could not be created")]
    CreateFailed,

    #[error("Dog not found")]
    DogNotFound,

    #[error("Dog could not be updated")]
    UpdateFailed,

    #[error("Dog could not be deleted")]
    DeleteFailed,
}

/// Generic error envelope for unexpected failures
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    fn new(message: impl Into<String>, code: &str) -> Self {
        Self {
            success: false,
            message: message.into(),
            code: Some(code.to_string()),
        }
    }
}

/// Body of a failed create
#[derive(Serialize)]
struct CreateFailedResponse {
    error: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Store(StoreError::Pool(e @ PoolError::Timeout(_))) => {
                error!("Pool error: {:?}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(ErrorResponse::new(
                        "Database connection pool exhausted",
                        "POOL_EXHAUSTED",
                    )),
                )
                    .into_response()
            }
            AppError::Store(e) => {
                error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(
                        "A database error occurred",
                        "DATABASE_ERROR",
                    )),
                )
                    .into_response()
            }
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(msg, "BAD_REQUEST")),
            )
                .into_response(),
            AppError::InvalidId => (
                StatusCode::BAD_REQUEST,
                Json(MessageResponse::new("id should be a number")),
            )
                .into_response(),
            AppError::InvalidDog(errors) => {
                (StatusCode::BAD_REQUEST, Json(ErrorListResponse { errors })).into_response()
            }
            AppError::InvalidUpdate(errors) => {
                (StatusCode::NOT_FOUND, Json(ErrorListResponse { errors })).into_response()
            }
            AppError::CreateFailed => (
                StatusCode::BAD_REQUEST,
                Json(CreateFailedResponse {
                    error: "Something Broke",
                }),
            )
                .into_response(),
            AppError::DogNotFound | AppError::DeleteFailed => {
                StatusCode::NO_CONTENT.into_response()
            }
            AppError::UpdateFailed => StatusCode::NOT_FOUND.into_response(),
        }
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_statuses() {
        let cases = [
            (AppError::InvalidId, StatusCode::BAD_REQUEST),
            (AppError::InvalidDog(vec![]), StatusCode::BAD_REQUEST),
            (AppError::InvalidUpdate(vec![]), StatusCode::NOT_FOUND),
            (AppError::CreateFailed, StatusCode::BAD_REQUEST),
            (AppError::DogNotFound, StatusCode::NO_CONTENT),
            (AppError::UpdateFailed, StatusCode::NOT_FOUND),
            (AppError::DeleteFailed, StatusCode::NO_CONTENT),
            (
                AppError::Store(StoreError::Pool(PoolError::Closed)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let label = err.to_string();
            assert_eq!(err.into_response().status(), status, "{label}");
        }
    }
}
