//! Mapping from service failures to HTTP responses.

use super::dto::{MessageBody, ValidationErrorBody};
use crate::task::{domain::TaskId, services::TaskLifecycleError, validation::ValidationFailures};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Message returned for unparsable status path segments.
pub const INVALID_STATUS_MESSAGE: &str =
    "Invalid status value. Valid values are: 0 (NotStarted), 1 (InProgress), 2 (Completed).";

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request fields failed validation.
    #[error(transparent)]
    Validation(ValidationFailures),

    /// No task matches the addressed identifier.
    #[error("Task with ID {0} was not found.")]
    NotFound(TaskId),

    /// The request could not be interpreted.
    #[error("{0}")]
    BadRequest(String),

    /// Storage failed; details stay in the server log.
    #[error("An unexpected error occurred while processing the request.")]
    Internal,
}

impl ApiError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TaskLifecycleError> for ApiError {
    fn from(err: TaskLifecycleError) -> Self {
        match err {
            TaskLifecycleError::Validation(failures) => Self::Validation(failures),
            TaskLifecycleError::NotFound(id) => Self::NotFound(id),
            TaskLifecycleError::InvalidOperation(domain_err) => {
                Self::BadRequest(domain_err.to_string())
            }
            TaskLifecycleError::Persistence(_) => Self::Internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::Validation(failures) => {
                (status, Json(ValidationErrorBody::from(&failures))).into_response()
            }
            other => {
                let body = MessageBody {
                    message: other.to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
