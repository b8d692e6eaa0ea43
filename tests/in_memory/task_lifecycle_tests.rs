//! End-to-end task flows through the service and in-memory store.

use crate::in_memory::helpers::{TestService, repository, service};
use chrono::{Duration, Utc};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;
use tasklane::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::TaskStatus,
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskLifecycleError, TaskLifecycleService, UpdateTaskRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_round_trip(service: TestService) {
    let due = Utc::now() + Duration::days(14);
    let created = service
        .create(
            CreateTaskRequest::new("Renew passport")
                .with_description("Photos first")
                .with_due_date(due),
        )
        .await
        .expect("create should succeed");
    let id = created.id().to_string();

    let started = service
        .mark_in_progress(&id)
        .await
        .expect("start should succeed");
    assert_eq!(started.status(), TaskStatus::InProgress);

    let edited = service
        .update(
            &id,
            UpdateTaskRequest::new("Renew passport and ID").with_due_date(due),
        )
        .await
        .expect("update should succeed");
    assert_eq!(edited.status(), TaskStatus::InProgress);
    assert_eq!(edited.description(), None);
    assert!(edited.updated_at() >= started.updated_at());

    let finished = service
        .mark_complete(&id)
        .await
        .expect("complete should succeed");
    assert_eq!(finished.status(), TaskStatus::Completed);
    assert_eq!(finished.created_at(), created.created_at());

    service.delete(&id).await.expect("delete should succeed");
    assert!(matches!(
        service.get_by_id(&id).await,
        Err(TaskLifecycleError::NotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_requests_leave_store_untouched(repository: Arc<InMemoryTaskRepository>) {
    let service = TaskLifecycleService::new(Arc::clone(&repository), Arc::new(DefaultClock));
    let created = service
        .create(CreateTaskRequest::new("Stable"))
        .await
        .expect("create should succeed");

    let result = service
        .update(&created.id().to_string(), UpdateTaskRequest::new(""))
        .await;
    assert!(matches!(result, Err(TaskLifecycleError::Validation(_))));

    let stored = repository
        .find_by_id(created.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(stored, Some(created));
    assert_eq!(repository.len().expect("len should succeed"), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cloned_services_share_storage(service: TestService) {
    let other = service.clone();
    let created = service
        .create(CreateTaskRequest::new("Shared"))
        .await
        .expect("create should succeed");

    let fetched = other
        .get_by_id(&created.id().to_string())
        .await
        .expect("lookup should succeed");

    assert_eq!(fetched, created);
}
