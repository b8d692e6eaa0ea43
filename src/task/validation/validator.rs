//! Request-level validator combining the field rules.

use super::{TaskValidationError, ValidationFailures, ValidationResult, rules};
use crate::task::domain::{TaskDetails, TaskId, TaskStatus};
use chrono::{DateTime, Utc};

/// Validates task requests, collecting all failures rather than stopping at
/// the first.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use tasklane::task::domain::TaskDetails;
/// use tasklane::task::validation::TaskValidator;
///
/// let validator = TaskValidator::new();
/// assert!(validator.validate_details(&TaskDetails::new("Write docs"), Utc::now()).is_ok());
/// assert!(validator.validate_details(&TaskDetails::new("   "), Utc::now()).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskValidator;

impl TaskValidator {
    /// Creates a validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates the editable fields of a create or update request.
    ///
    /// # Errors
    ///
    /// Returns every title, description, and due date failure.
    pub fn validate_details(
        &self,
        details: &TaskDetails,
        now: DateTime<Utc>,
    ) -> ValidationResult<()> {
        let mut errors = Vec::new();
        Self::collect_detail_errors(&mut errors, details, now);
        finish(errors)
    }

    /// Validates an identifier for lookup, delete, and transition requests.
    ///
    /// # Errors
    ///
    /// Returns the identifier failure.
    pub fn validate_task_id(&self, raw_id: &str) -> ValidationResult<TaskId> {
        Ok(rules::parse_task_id(raw_id)?)
    }

    /// Validates an update request: identifier and editable fields together.
    ///
    /// # Errors
    ///
    /// Returns every identifier and field failure.
    pub fn validate_update(
        &self,
        raw_id: &str,
        details: &TaskDetails,
        now: DateTime<Utc>,
    ) -> ValidationResult<TaskId> {
        let mut errors = Vec::new();
        let id = rules::parse_task_id(raw_id)
            .map_err(|error| errors.push(error))
            .ok();
        Self::collect_detail_errors(&mut errors, details, now);
        match (id, ValidationFailures::from_errors(errors)) {
            (Some(task_id), None) => Ok(task_id),
            (_, Some(failures)) => Err(failures),
            (None, None) => Err(TaskValidationError::TaskIdRequired.into()),
        }
    }

    /// Validates a status filter code.
    ///
    /// # Errors
    ///
    /// Returns the status failure for codes outside `{0, 1, 2}`.
    pub fn validate_status(&self, code: i64) -> ValidationResult<TaskStatus> {
        Ok(rules::parse_status(code)?)
    }

    fn collect_detail_errors(
        errors: &mut Vec<TaskValidationError>,
        details: &TaskDetails,
        now: DateTime<Utc>,
    ) {
        let outcomes = [
            rules::validate_title(details.title(), rules::MAX_TITLE_CHARS),
            rules::validate_description(details.description(), rules::MAX_DESCRIPTION_CHARS),
            rules::validate_due_date(details.due_date(), now),
        ];
        errors.extend(outcomes.into_iter().filter_map(Result::err));
    }
}

fn finish(errors: Vec<TaskValidationError>) -> ValidationResult<()> {
    ValidationFailures::from_errors(errors).map_or(Ok(()), Err)
}
