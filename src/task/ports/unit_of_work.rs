//! Request-scoped unit of work over a [`TaskRepository`].

use super::{PendingChange, TaskRepository, TaskRepositoryResult};
use crate::task::domain::{Task, TaskId, TaskStatus};

/// Accumulates inserts, updates, and removals for one request and applies
/// them in a single atomic [`commit`](Self::commit).
///
/// Reads go straight to the repository. Dropping a unit of work without
/// committing discards every pending change, so an abandoned request leaves
/// storage untouched.
#[derive(Debug)]
pub struct TaskUnitOfWork<'r, R>
where
    R: TaskRepository + ?Sized,
{
    repository: &'r R,
    pending: Vec<PendingChange>,
}

impl<'r, R> TaskUnitOfWork<'r, R>
where
    R: TaskRepository + ?Sized,
{
    /// Starts an empty unit of work.
    #[must_use]
    pub const fn new(repository: &'r R) -> Self {
        Self {
            repository,
            pending: Vec::new(),
        }
    }

    /// Returns every task, newest first.
    ///
    /// # Errors
    ///
    /// Propagates repository failures.
    pub async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.repository.list_all().await
    }

    /// Returns tasks with exactly `status`, newest first.
    ///
    /// # Errors
    ///
    /// Propagates repository failures.
    pub async fn list_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        self.repository.list_by_status(status).await
    }

    /// Finds a task by identifier; absence is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Propagates repository failures.
    pub async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.repository.find_by_id(id).await
    }

    /// Queues a new task for insertion and hands it back.
    ///
    /// Identifier, timestamps, and status must already be assigned.
    pub fn insert(&mut self, task: Task) -> Task {
        self.pending.push(PendingChange::Insert(task.clone()));
        task
    }

    /// Records that a loaded task's fields changed.
    pub fn mark_dirty(&mut self, task: &Task) {
        self.pending.push(PendingChange::Update(task.clone()));
    }

    /// Records a task for deletion.
    pub fn mark_removed(&mut self, task: &Task) {
        self.pending.push(PendingChange::Remove(task.id()));
    }

    /// Returns the changes queued so far.
    #[must_use]
    pub fn pending(&self) -> &[PendingChange] {
        &self.pending
    }

    /// Applies all pending changes atomically, consuming the unit of work.
    ///
    /// Returns the number of affected rows. Committing with nothing pending
    /// returns `0` without touching the repository.
    ///
    /// # Errors
    ///
    /// Propagates repository failures; on failure nothing is persisted.
    pub async fn commit(self) -> TaskRepositoryResult<usize> {
        if self.pending.is_empty() {
            return Ok(0);
        }
        self.repository.apply(self.pending).await
    }
}
