//! Error types for task domain construction and parsing.

use thiserror::Error;

/// Errors returned while constructing or reconstructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The status code is not one of the defined task statuses.
    #[error("unknown task status code {0}, expected 0 (NotStarted), 1 (InProgress), or 2 (Completed)")]
    UnknownStatus(i64),

    /// The text is not a UUID task identifier.
    #[error("invalid task identifier '{0}'")]
    InvalidTaskId(String),
}
