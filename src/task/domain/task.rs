//! Task aggregate root and its editable field group.

use super::{TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// The user-editable fields of a task.
///
/// Field edits replace all three values together; validation happens before
/// a value of this type reaches the aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    title: String,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
}

impl TaskDetails {
    /// Creates a detail set with only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
        }
    }

    /// Sets the optional description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Sets the optional due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    details: TaskDetails,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new task in [`TaskStatus::NotStarted`] with a fresh
    /// identifier.
    #[must_use]
    pub fn new(details: TaskDetails, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            details,
            status: TaskStatus::NotStarted,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        let details = TaskDetails::new(data.title)
            .with_description(data.description)
            .with_due_date(data.due_date);
        Self {
            id: data.id,
            details,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the editable field group.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.details.title()
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.details.description()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.details.due_date()
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the task to [`TaskStatus::InProgress`].
    ///
    /// Allowed from every status, including `InProgress` itself; the update
    /// timestamp is stamped either way.
    pub fn mark_in_progress(&mut self, clock: &impl Clock) {
        self.set_status(TaskStatus::InProgress, clock);
    }

    /// Moves the task to [`TaskStatus::Completed`].
    pub fn mark_complete(&mut self, clock: &impl Clock) {
        self.set_status(TaskStatus::Completed, clock);
    }

    /// Resets the task to [`TaskStatus::NotStarted`].
    pub fn mark_incomplete(&mut self, clock: &impl Clock) {
        self.set_status(TaskStatus::NotStarted, clock);
    }

    /// Replaces title, description, and due date. The status is untouched.
    pub fn update_details(&mut self, details: TaskDetails, clock: &impl Clock) {
        self.details = details;
        self.touch(clock);
    }

    fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Stamps `updated_at`, never moving it backwards.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc().max(self.updated_at);
    }
}
