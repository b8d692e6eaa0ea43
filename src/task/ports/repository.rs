//! Repository port for task persistence and lookup.

use crate::task::domain::{Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// A single change waiting to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingChange {
    /// Store a new task row.
    Insert(Task),
    /// Overwrite an existing task row.
    Update(Task),
    /// Hard-delete an existing task row.
    Remove(TaskId),
}

impl PendingChange {
    /// Returns the identifier of the row this change touches.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        match self {
            Self::Insert(task) | Self::Update(task) => task.id(),
            Self::Remove(id) => *id,
        }
    }
}

/// Task persistence contract.
///
/// Reads never fail because of absence: empty stores yield empty lists and a
/// missing row yields `None`. Writes are batched into [`PendingChange`]s and
/// applied through [`TaskRepository::apply`].
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns every task, newest `created_at` first.
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns tasks with exactly `status`, newest `created_at` first.
    async fn list_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Applies `changes` atomically and returns the number of affected rows.
    ///
    /// Either every change is applied or none is.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when an inserted
    /// identifier already exists, [`TaskRepositoryError::NotFound`] when an
    /// updated or removed row is missing, and
    /// [`TaskRepositoryError::Persistence`] for storage failures.
    async fn apply(&self, changes: Vec<PendingChange>) -> TaskRepositoryResult<usize>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
