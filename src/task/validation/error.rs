//! Validation failure types.

use std::fmt;
use thiserror::Error;

/// A single field-level validation failure.
///
/// The display text is the client-facing message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskValidationError {
    /// The title is missing or blank.
    #[error("Title is required")]
    TitleRequired,

    /// The title is longer than allowed.
    #[error("Title must not exceed {max} characters")]
    TitleTooLong {
        /// Maximum number of characters.
        max: usize,
        /// Actual number of characters.
        actual: usize,
    },

    /// The description is longer than allowed.
    #[error("Description must not exceed {max} characters")]
    DescriptionTooLong {
        /// Maximum number of characters.
        max: usize,
        /// Actual number of characters.
        actual: usize,
    },

    /// The due date is not strictly after the validation instant.
    #[error("Due date must be in the future")]
    DueDateNotInFuture,

    /// The task identifier is empty or nil.
    #[error("Task ID is required")]
    TaskIdRequired,

    /// The task identifier is not a UUID.
    #[error("Task ID must be a valid identifier")]
    MalformedTaskId(String),

    /// The status filter is outside the defined status codes.
    #[error("Passed value is not part of Status Values")]
    UnknownStatus(i64),
}

impl TaskValidationError {
    /// Returns the wire name of the field the failure belongs to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::TitleRequired | Self::TitleTooLong { .. } => "title",
            Self::DescriptionTooLong { .. } => "description",
            Self::DueDateNotInFuture => "dueDate",
            Self::TaskIdRequired | Self::MalformedTaskId(_) => "id",
            Self::UnknownStatus(_) => "status",
        }
    }
}

/// Non-empty, ordered list of validation failures for one request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("validation failed: {}", format_failures(&self.0))]
pub struct ValidationFailures(Vec<TaskValidationError>);

impl ValidationFailures {
    /// Wraps collected failures, returning `None` when there are none.
    #[must_use]
    pub fn from_errors(errors: Vec<TaskValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    /// Returns the individual failures in the order they were found.
    #[must_use]
    pub fn errors(&self) -> &[TaskValidationError] {
        &self.0
    }

    /// Returns `true` if any failure matches `predicate`.
    pub fn contains(&self, predicate: impl Fn(&TaskValidationError) -> bool) -> bool {
        self.0.iter().any(predicate)
    }
}

impl From<TaskValidationError> for ValidationFailures {
    fn from(error: TaskValidationError) -> Self {
        Self(vec![error])
    }
}

impl IntoIterator for ValidationFailures {
    type Item = TaskValidationError;
    type IntoIter = std::vec::IntoIter<TaskValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

fn format_failures(errors: &[TaskValidationError]) -> String {
    errors
        .iter()
        .map(|error| FieldMessage(error).to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

struct FieldMessage<'a>(&'a TaskValidationError);

impl fmt::Display for FieldMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.0.field(), self.0)
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationFailures>;
