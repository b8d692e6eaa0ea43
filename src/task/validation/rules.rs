//! Individual validation rules.
//!
//! Each rule checks a single field and returns `Ok` or the specific
//! [`TaskValidationError`] for that field.

use super::TaskValidationError;
use crate::task::domain::{TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Maximum title length in characters, matching the `VARCHAR(200)` column.
pub const MAX_TITLE_CHARS: usize = 200;

/// Maximum description length in characters, matching the `VARCHAR(1000)`
/// column.
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

/// Validates that the title is present and within `max_chars`.
///
/// # Errors
///
/// Returns [`TaskValidationError::TitleRequired`] for blank titles and
/// [`TaskValidationError::TitleTooLong`] when the title is too long.
pub fn validate_title(title: &str, max_chars: usize) -> Result<(), TaskValidationError> {
    if title.trim().is_empty() {
        return Err(TaskValidationError::TitleRequired);
    }
    let actual = title.chars().count();
    if actual > max_chars {
        return Err(TaskValidationError::TitleTooLong {
            max: max_chars,
            actual,
        });
    }
    Ok(())
}

/// Validates that a present description is within `max_chars`.
///
/// # Errors
///
/// Returns [`TaskValidationError::DescriptionTooLong`] when the description
/// is too long.
pub fn validate_description(
    description: Option<&str>,
    max_chars: usize,
) -> Result<(), TaskValidationError> {
    let Some(text) = description else {
        return Ok(());
    };
    let actual = text.chars().count();
    if actual > max_chars {
        return Err(TaskValidationError::DescriptionTooLong {
            max: max_chars,
            actual,
        });
    }
    Ok(())
}

/// Validates that a present due date is strictly after `now`.
///
/// # Errors
///
/// Returns [`TaskValidationError::DueDateNotInFuture`] when the due date is
/// at or before `now`.
pub fn validate_due_date(
    due_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<(), TaskValidationError> {
    match due_date {
        Some(due) if due <= now => Err(TaskValidationError::DueDateNotInFuture),
        _ => Ok(()),
    }
}

/// Parses a task identifier supplied by a caller.
///
/// # Errors
///
/// Returns [`TaskValidationError::TaskIdRequired`] for blank input or the nil
/// UUID, and [`TaskValidationError::MalformedTaskId`] for anything that is not
/// a UUID.
pub fn parse_task_id(raw: &str) -> Result<TaskId, TaskValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::TaskIdRequired);
    }
    let uuid = Uuid::parse_str(trimmed)
        .map_err(|_| TaskValidationError::MalformedTaskId(raw.to_owned()))?;
    if uuid.is_nil() {
        return Err(TaskValidationError::TaskIdRequired);
    }
    Ok(TaskId::from_uuid(uuid))
}

/// Parses a status filter code.
///
/// # Errors
///
/// Returns [`TaskValidationError::UnknownStatus`] for codes outside
/// `{0, 1, 2}`.
pub fn parse_status(code: i64) -> Result<TaskStatus, TaskValidationError> {
    TaskStatus::try_from(code).map_err(|_| TaskValidationError::UnknownStatus(code))
}
