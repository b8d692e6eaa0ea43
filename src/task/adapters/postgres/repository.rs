//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{PersistedTaskData, Task, TaskId, TaskStatus},
    ports::{PendingChange, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Idempotent schema for the `tasks` table and its indexes.
const CREATE_TASKS_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_tasks/up.sql");

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when the pool cannot open its
/// initial connections.
pub fn build_pool(database_url: &str, max_size: u32) -> TaskRepositoryResult<TaskPgPool> {
    Pool::builder()
        .max_size(max_size)
        .build(ConnectionManager::<PgConnection>::new(database_url))
        .map_err(TaskRepositoryError::persistence)
}

/// Creates the `tasks` table and indexes when they do not exist yet.
///
/// This is a blocking call; run it before serving requests.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when a connection cannot be
/// acquired or the schema statements fail.
pub fn apply_schema(pool: &TaskPgPool) -> TaskRepositoryResult<()> {
    let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
    connection
        .batch_execute(CREATE_TASKS_SQL)
        .map_err(TaskRepositoryError::persistence)
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

/// Failure inside a batch transaction; any variant rolls the batch back.
#[derive(Debug, Error)]
enum BatchError {
    #[error(transparent)]
    Rejected(TaskRepositoryError),
    #[error(transparent)]
    Database(#[from] DieselError),
}

impl From<BatchError> for TaskRepositoryError {
    fn from(err: BatchError) -> Self {
        match err {
            BatchError::Rejected(inner) => inner,
            BatchError::Database(diesel_err) => Self::persistence(diesel_err),
        }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .order((tasks::created_at.desc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::status.eq(status.code()))
                .order((tasks::created_at.desc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn apply(&self, changes: Vec<PendingChange>) -> TaskRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            connection
                .transaction::<usize, BatchError, _>(|transaction| {
                    changes.iter().try_fold(0_usize, |affected, change| {
                        Ok(affected + apply_change(transaction, change)?)
                    })
                })
                .map_err(TaskRepositoryError::from)
        })
        .await
    }
}

fn apply_change(connection: &mut PgConnection, change: &PendingChange) -> Result<usize, BatchError> {
    let task_id = change.task_id();
    let target = tasks::table.filter(tasks::id.eq(task_id.into_inner()));
    let affected = match change {
        PendingChange::Insert(task) => diesel::insert_into(tasks::table)
            .values(NewTaskRow::from(task))
            .execute(connection)
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    BatchError::Rejected(TaskRepositoryError::DuplicateTask(task_id))
                }
                other => BatchError::Database(other),
            })?,
        PendingChange::Update(task) => diesel::update(target)
            .set(TaskChangeset::from(task))
            .execute(connection)?,
        PendingChange::Remove(_) => diesel::delete(target).execute(connection)?,
    };
    if affected == 0 {
        return Err(BatchError::Rejected(TaskRepositoryError::NotFound(task_id)));
    }
    Ok(affected)
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        status: persisted_status,
        created_at,
        updated_at,
        due_date,
    } = row;

    let status = TaskStatus::try_from(persisted_status).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        status,
        created_at,
        updated_at,
        due_date,
    }))
}
