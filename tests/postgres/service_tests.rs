//! Service flows over `PostgreSQL` storage.

use crate::postgres::helpers::{BoxError, PostgresContext, context};
use rstest::rstest;
use tasklane::task::{
    domain::{TaskId, TaskStatus},
    services::{CreateTaskRequest, TaskLifecycleError, UpdateTaskRequest},
};

#[rstest]
fn update_and_transition_persist(
    context: Result<PostgresContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context?;
    let service = &ctx.service;
    let created =
        ctx.block_on(service.create(CreateTaskRequest::new("Draft").with_description("first")))?;
    let id = created.id().to_string();

    ctx.block_on(service.mark_in_progress(&id))?;
    ctx.block_on(service.update(&id, UpdateTaskRequest::new("Final")))?;

    let fetched = ctx.block_on(service.get_by_id(&id))?;
    assert_eq!(fetched.title(), "Final");
    assert_eq!(fetched.description(), None);
    assert_eq!(fetched.status(), TaskStatus::InProgress);
    assert!(fetched.updated_at() >= fetched.created_at());
    Ok(())
}

#[rstest]
fn delete_removes_row(context: Result<PostgresContext, BoxError>) -> Result<(), BoxError> {
    let ctx = context?;
    let created = ctx.block_on(ctx.service.create(CreateTaskRequest::new("Gone")))?;
    let id = created.id().to_string();

    ctx.block_on(ctx.service.delete(&id))?;

    assert!(matches!(
        ctx.block_on(ctx.service.get_by_id(&id)),
        Err(TaskLifecycleError::NotFound(_))
    ));
    Ok(())
}

#[rstest]
fn missing_task_transition_is_not_found(
    context: Result<PostgresContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context?;

    let result = ctx.block_on(ctx.service.mark_complete(&TaskId::new().to_string()));

    assert!(matches!(result, Err(TaskLifecycleError::NotFound(_))));
    Ok(())
}
