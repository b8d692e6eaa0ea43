//! In-memory repository for development runs and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::{PendingChange, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Clones share the same underlying store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] if the lock is poisoned.
    pub fn len(&self) -> TaskRepositoryResult<usize> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.tasks.len())
    }

    /// Returns `true` when no tasks are stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] if the lock is poisoned.
    pub fn is_empty(&self) -> TaskRepositoryResult<bool> {
        Ok(self.len()? == 0)
    }

    fn collect_sorted(&self, filter: impl Fn(&Task) -> bool) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| filter(task))
            .cloned()
            .collect();
        tasks.sort_by(|left, right| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then_with(|| left.id().cmp(&right.id()))
        });
        Ok(tasks)
    }
}

fn poisoned<T>(err: &std::sync::PoisonError<T>) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Checks every change against the current rows and the changes queued ahead
/// of it, so that a failing batch leaves the store untouched.
fn check_batch(state: &InMemoryTaskState, changes: &[PendingChange]) -> TaskRepositoryResult<()> {
    let mut present: HashMap<TaskId, bool> = HashMap::new();
    for change in changes {
        let id = change.task_id();
        let exists = present
            .get(&id)
            .copied()
            .unwrap_or_else(|| state.tasks.contains_key(&id));
        match change {
            PendingChange::Insert(_) if exists => {
                return Err(TaskRepositoryError::DuplicateTask(id));
            }
            PendingChange::Update(_) | PendingChange::Remove(_) if !exists => {
                return Err(TaskRepositoryError::NotFound(id));
            }
            _ => {}
        }
        present.insert(id, !matches!(change, PendingChange::Remove(_)));
    }
    Ok(())
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.collect_sorted(|_| true)
    }

    async fn list_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        self.collect_sorted(|task| task.status() == status)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn apply(&self, changes: Vec<PendingChange>) -> TaskRepositoryResult<usize> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        check_batch(&state, &changes)?;

        let affected = changes.len();
        for change in changes {
            match change {
                PendingChange::Insert(task) | PendingChange::Update(task) => {
                    state.tasks.insert(task.id(), task);
                }
                PendingChange::Remove(id) => {
                    state.tasks.remove(&id);
                }
            }
        }
        Ok(affected)
    }
}
