//! API Error Handling
//!
//! Maps worker errors to the `{error_code, message}` envelope a Connect
//! worker replies with.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kconnect_core::ErrorBody;

use crate::worker::WorkerError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Conflict(String),
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        tracing::debug!("Replying {}: {}", status, message);

        (status, Json(ErrorBody::new(status.as_u16(), message))).into_response()
    }
}

impl From<WorkerError> for ApiError {
    fn from(err: WorkerError) -> Self {
        match err {
            WorkerError::NotFound(msg) => ApiError::NotFound(msg),
            WorkerError::Conflict(msg) => ApiError::Conflict(msg),
            WorkerError::BadRequest(msg) => ApiError::BadRequest(msg),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
