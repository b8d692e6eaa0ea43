//! Task status values and their integer encoding.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
///
/// Encoded as an integer (`0`, `1`, `2`) on the wire and in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i64")]
pub enum TaskStatus {
    /// Work on the task has not started.
    NotStarted,
    /// The task is being worked on.
    InProgress,
    /// The task is finished.
    Completed,
}

impl TaskStatus {
    /// Every defined status, in code order.
    pub const ALL: [Self; 3] = [Self::NotStarted, Self::InProgress, Self::Completed];

    /// Returns the integer code used on the wire and in storage.
    #[must_use]
    pub const fn code(self) -> i16 {
        match self {
            Self::NotStarted => 0,
            Self::InProgress => 1,
            Self::Completed => 2,
        }
    }

    /// Returns the status name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "NotStarted",
            Self::InProgress => "InProgress",
            Self::Completed => "Completed",
        }
    }
}

impl From<TaskStatus> for i16 {
    fn from(status: TaskStatus) -> Self {
        status.code()
    }
}

impl TryFrom<i64> for TaskStatus {
    type Error = TaskDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NotStarted),
            1 => Ok(Self::InProgress),
            2 => Ok(Self::Completed),
            _ => Err(TaskDomainError::UnknownStatus(value)),
        }
    }
}

impl TryFrom<i16> for TaskStatus {
    type Error = TaskDomainError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
