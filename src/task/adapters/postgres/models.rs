//! Diesel row models for task persistence.

use super::schema::tasks;
use crate::task::domain::Task;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Status code.
    pub status: i16,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Status code.
    pub status: i16,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
}

/// Update model for task records. `id` and `created_at` are never written.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Optional description; `None` clears the column.
    pub description: Option<String>,
    /// Status code.
    pub status: i16,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optional due date; `None` clears the column.
    pub due_date: Option<DateTime<Utc>>,
}

impl From<&Task> for NewTaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().into_inner(),
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            status: task.status().code(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
            due_date: task.due_date(),
        }
    }
}

impl From<&Task> for TaskChangeset {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            status: task.status().code(),
            updated_at: task.updated_at(),
            due_date: task.due_date(),
        }
    }
}
