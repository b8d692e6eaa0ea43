//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;
pub mod unit_of_work;

pub use repository::{PendingChange, TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use unit_of_work::TaskUnitOfWork;
