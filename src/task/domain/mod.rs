//! Domain model for task lifecycle management.
//!
//! The task domain models creation, field edits, and status transitions while
//! keeping validation and infrastructure concerns outside of the domain
//! boundary.

mod error;
mod ids;
mod status;
mod task;

pub use error::TaskDomainError;
pub use ids::TaskId;
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task, TaskDetails};
