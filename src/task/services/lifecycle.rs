//! Service layer for task creation, lookup, field edits, and status
//! transitions.

use crate::task::{
    domain::{Task, TaskDetails, TaskDomainError, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskUnitOfWork},
    validation::{TaskValidator, ValidationFailures},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

/// Request payload for creating a task.
///
/// Only the editable fields are accepted; identifier, status, and timestamps
/// are always assigned by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the task due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    fn into_details(self) -> TaskDetails {
        TaskDetails::new(self.title)
            .with_description(self.description)
            .with_due_date(self.due_date)
    }
}

/// Request payload for replacing a task's editable fields.
///
/// Omitted optional fields clear the stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: String,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
}

impl UpdateTaskRequest {
    /// Creates a request with the replacement title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
        }
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    fn into_details(self) -> TaskDetails {
        TaskDetails::new(self.title)
            .with_description(self.description)
            .with_due_date(self.due_date)
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// One or more request fields are invalid.
    #[error(transparent)]
    Validation(#[from] ValidationFailures),

    /// No task exists with the identifier.
    #[error("Task with ID {0} was not found.")]
    NotFound(TaskId),

    /// A domain rule rejected the operation.
    #[error("invalid task operation: {0}")]
    InvalidOperation(#[from] TaskDomainError),

    /// Storage failed; nothing from the request was persisted.
    #[error(transparent)]
    Persistence(TaskRepositoryError),
}

impl TaskLifecycleError {
    /// Returns `true` for failures the caller can correct by changing the
    /// request.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Persistence(_))
    }
}

impl From<TaskRepositoryError> for TaskLifecycleError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Persistence(other),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Every call runs validate, load, mutate, and commit in order inside its own
/// unit of work. No state is kept between calls; the repository is the single
/// source of truth.
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    validator: TaskValidator,
}

impl<R, C> Clone for TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            validator: self.validator,
        }
    }
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            validator: TaskValidator::new(),
        }
    }

    /// Returns every task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Persistence`] when the lookup fails.
    pub async fn list_all(&self) -> TaskLifecycleResult<Vec<Task>> {
        let unit = self.unit_of_work();
        unit.list_all().await.map_err(repository_failure)
    }

    /// Returns tasks whose status code equals `status_code`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] for codes outside
    /// `{0, 1, 2}` and [`TaskLifecycleError::Persistence`] when the lookup
    /// fails.
    pub async fn list_by_status(&self, status_code: i64) -> TaskLifecycleResult<Vec<Task>> {
        let status = self.validator.validate_status(status_code).inspect_err(|failures| {
            debug!(status_code, %failures, "rejected status filter");
        })?;
        let unit = self.unit_of_work();
        unit.list_by_status(status)
            .await
            .map_err(repository_failure)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] for a malformed identifier
    /// and [`TaskLifecycleError::NotFound`] when no task matches.
    pub async fn get_by_id(&self, raw_id: &str) -> TaskLifecycleResult<Task> {
        let id = self.validated_id(raw_id)?;
        let unit = self.unit_of_work();
        load(&unit, id).await
    }

    /// Creates a task in the not-started status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] when fields are invalid and
    /// [`TaskLifecycleError::Persistence`] when the commit fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let details = request.into_details();
        self.validator
            .validate_details(&details, self.clock.utc())
            .inspect_err(|failures| debug!(%failures, "rejected task creation"))?;

        let mut unit = self.unit_of_work();
        let task = unit.insert(Task::new(details, &*self.clock));
        commit(unit).await?;
        info!(task_id = %task.id(), "created task");
        Ok(task)
    }

    /// Replaces a task's title, description, and due date.
    ///
    /// The status is never changed by this operation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] when the identifier or
    /// fields are invalid, [`TaskLifecycleError::NotFound`] when no task
    /// matches, and [`TaskLifecycleError::Persistence`] when the commit fails.
    pub async fn update(
        &self,
        raw_id: &str,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let details = request.into_details();
        let id = self
            .validator
            .validate_update(raw_id, &details, self.clock.utc())
            .inspect_err(|failures| debug!(%failures, "rejected task update"))?;

        let mut unit = self.unit_of_work();
        let mut task = load(&unit, id).await?;
        task.update_details(details, &*self.clock);
        unit.mark_dirty(&task);
        commit(unit).await?;
        debug!(task_id = %id, "updated task details");
        Ok(task)
    }

    /// Hard-deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] for a malformed identifier,
    /// [`TaskLifecycleError::NotFound`] when no task matches, and
    /// [`TaskLifecycleError::Persistence`] when the commit fails.
    pub async fn delete(&self, raw_id: &str) -> TaskLifecycleResult<()> {
        let id = self.validated_id(raw_id)?;
        let mut unit = self.unit_of_work();
        let task = load(&unit, id).await?;
        unit.mark_removed(&task);
        commit(unit).await?;
        info!(task_id = %id, "deleted task");
        Ok(())
    }

    /// Moves a task to the completed status.
    ///
    /// # Errors
    ///
    /// See [`Self::mark_in_progress`].
    pub async fn mark_complete(&self, raw_id: &str) -> TaskLifecycleResult<Task> {
        self.transition(raw_id, Task::mark_complete).await
    }

    /// Resets a task to the not-started status.
    ///
    /// # Errors
    ///
    /// See [`Self::mark_in_progress`].
    pub async fn mark_incomplete(&self, raw_id: &str) -> TaskLifecycleResult<Task> {
        self.transition(raw_id, Task::mark_incomplete).await
    }

    /// Moves a task to the in-progress status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] for a malformed identifier,
    /// [`TaskLifecycleError::NotFound`] when no task matches, and
    /// [`TaskLifecycleError::Persistence`] when the commit fails.
    pub async fn mark_in_progress(&self, raw_id: &str) -> TaskLifecycleResult<Task> {
        self.transition(raw_id, Task::mark_in_progress).await
    }

    async fn transition(
        &self,
        raw_id: &str,
        apply: impl FnOnce(&mut Task, &C) + Send,
    ) -> TaskLifecycleResult<Task> {
        let id = self.validated_id(raw_id)?;
        let mut unit = self.unit_of_work();
        let mut task = load(&unit, id).await?;
        let from = task.status();
        apply(&mut task, &*self.clock);
        unit.mark_dirty(&task);
        commit(unit).await?;
        debug!(task_id = %id, %from, to = %task.status(), "transitioned task");
        Ok(task)
    }

    fn validated_id(&self, raw_id: &str) -> Result<TaskId, ValidationFailures> {
        self.validator
            .validate_task_id(raw_id)
            .inspect_err(|failures| debug!(raw_id, %failures, "rejected task identifier"))
    }

    fn unit_of_work(&self) -> TaskUnitOfWork<'_, R> {
        TaskUnitOfWork::new(&*self.repository)
    }
}

/// Maps a repository error, logging storage failures. Absence is an expected
/// outcome and is not logged.
fn repository_failure(err: TaskRepositoryError) -> TaskLifecycleError {
    let mapped = TaskLifecycleError::from(err);
    if let TaskLifecycleError::Persistence(source) = &mapped {
        error!(error = %source, "task storage operation failed");
    }
    mapped
}

async fn commit<R>(unit: TaskUnitOfWork<'_, R>) -> TaskLifecycleResult<usize>
where
    R: TaskRepository + ?Sized,
{
    let pending = unit.pending().len();
    let affected = unit.commit().await.map_err(repository_failure)?;
    debug!(pending, affected, "committed unit of work");
    Ok(affected)
}

async fn load<R>(unit: &TaskUnitOfWork<'_, R>, id: TaskId) -> TaskLifecycleResult<Task>
where
    R: TaskRepository + ?Sized,
{
    unit.find_by_id(id)
        .await
        .map_err(repository_failure)?
        .ok_or(TaskLifecycleError::NotFound(id))
}
