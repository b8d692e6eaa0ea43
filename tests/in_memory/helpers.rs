//! Shared fixtures for in-memory integration tests.

use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use tasklane::task::{adapters::memory::InMemoryTaskRepository, services::TaskLifecycleService};

/// Service type under test.
pub type TestService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Backing store shared by fixtures that need direct access.
#[fixture]
pub fn repository() -> Arc<InMemoryTaskRepository> {
    Arc::new(InMemoryTaskRepository::new())
}

/// Service over a fresh store.
#[fixture]
pub fn service(repository: Arc<InMemoryTaskRepository>) -> TestService {
    TaskLifecycleService::new(repository, Arc::new(DefaultClock))
}
