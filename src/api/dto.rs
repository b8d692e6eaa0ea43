//! JSON wire representation of tasks.
//!
//! Purely structural: field names are camelCase, status is its integer code,
//! and timestamps are RFC 3339 UTC. No business rules live here.

use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    services::{CreateTaskRequest, UpdateTaskRequest},
    validation::ValidationFailures,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Flat task record returned by every task endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    /// Server-assigned identifier.
    pub id: TaskId,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Status code: 0 not started, 1 in progress, 2 completed.
    pub status: TaskStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
}

impl From<&Task> for TaskDto {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            status: task.status(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
            due_date: task.due_date(),
        }
    }
}

impl From<Task> for TaskDto {
    fn from(task: Task) -> Self {
        Self::from(&task)
    }
}

/// Body of `POST /tasks`.
///
/// Any other field a client sends (`id`, `status`, timestamps) is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskDto {
    /// Title; a missing title is treated as empty.
    #[serde(default)]
    pub title: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional due date.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl From<CreateTaskDto> for CreateTaskRequest {
    fn from(dto: CreateTaskDto) -> Self {
        let mut request = Self::new(dto.title.unwrap_or_default());
        if let Some(description) = dto.description {
            request = request.with_description(description);
        }
        if let Some(due_date) = dto.due_date {
            request = request.with_due_date(due_date);
        }
        request
    }
}

/// Body of `PUT /tasks/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskDto {
    /// Replacement title; a missing title is treated as empty.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement description; omitting it clears the stored value.
    #[serde(default)]
    pub description: Option<String>,
    /// Replacement due date; omitting it clears the stored value.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl From<UpdateTaskDto> for UpdateTaskRequest {
    fn from(dto: UpdateTaskDto) -> Self {
        let mut request = Self::new(dto.title.unwrap_or_default());
        if let Some(description) = dto.description {
            request = request.with_description(description);
        }
        if let Some(due_date) = dto.due_date {
            request = request.with_due_date(due_date);
        }
        request
    }
}

/// One field-level failure in a 400 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrorDto {
    /// Wire name of the offending field.
    pub field: String,
    /// Client-facing message.
    pub message: String,
}

/// Body of a 400 response caused by validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorBody {
    /// Failures in the order they were found.
    pub errors: Vec<FieldErrorDto>,
}

impl From<&ValidationFailures> for ValidationErrorBody {
    fn from(failures: &ValidationFailures) -> Self {
        let errors = failures
            .errors()
            .iter()
            .map(|error| FieldErrorDto {
                field: error.field().to_owned(),
                message: error.to_string(),
            })
            .collect();
        Self { errors }
    }
}

/// Body of every other error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    /// Human-readable description of the failure.
    pub message: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    /// Always `"healthy"` while the process serves requests.
    pub status: String,
    /// Server time of the check.
    pub timestamp: DateTime<Utc>,
}
