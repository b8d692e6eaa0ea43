//! Batch application and query ordering against `PostgreSQL`.

use crate::postgres::helpers::{BoxError, PostgresContext, context, stored};
use chrono::Duration;
use mockable::{Clock, DefaultClock};
use rstest::rstest;
use tasklane::task::{
    domain::{Task, TaskDetails, TaskStatus},
    ports::{PendingChange, TaskRepository, TaskRepositoryError},
};

fn sample(title: &str) -> Task {
    Task::new(
        TaskDetails::new(title)
            .with_description(Some(format!("{title} body")))
            .with_due_date(Some(DefaultClock.utc() + Duration::days(1))),
        &DefaultClock,
    )
}

#[rstest]
fn template_clone_starts_empty(context: Result<PostgresContext, BoxError>) -> Result<(), BoxError> {
    let ctx = context?;

    let tasks = ctx.block_on(ctx.repository.list_all())?;

    assert!(tasks.is_empty());
    Ok(())
}

#[rstest]
fn insert_and_find_preserves_fields(
    context: Result<PostgresContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context?;
    let task = sample("Persist me");

    ctx.block_on(ctx.repository.apply(vec![PendingChange::Insert(task.clone())]))?;
    let found = ctx
        .block_on(ctx.repository.find_by_id(task.id()))?
        .ok_or("inserted task should be found")?;

    assert_eq!(found.id(), task.id());
    assert_eq!(found.title(), task.title());
    assert_eq!(found.description(), task.description());
    assert_eq!(found.status(), TaskStatus::NotStarted);
    assert_eq!(found.created_at(), stored(task.created_at()));
    assert_eq!(found.due_date(), task.due_date().map(stored));
    Ok(())
}

#[rstest]
fn failing_batch_rolls_back(context: Result<PostgresContext, BoxError>) -> Result<(), BoxError> {
    let ctx = context?;
    let fresh = sample("fresh");
    let ghost = sample("ghost");

    let result = ctx.block_on(ctx.repository.apply(vec![
        PendingChange::Insert(fresh.clone()),
        PendingChange::Remove(ghost.id()),
    ]));

    assert!(matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == ghost.id()));
    assert!(ctx.block_on(ctx.repository.find_by_id(fresh.id()))?.is_none());
    Ok(())
}

#[rstest]
fn duplicate_insert_is_reported(context: Result<PostgresContext, BoxError>) -> Result<(), BoxError> {
    let ctx = context?;
    let task = sample("once");
    ctx.block_on(ctx.repository.apply(vec![PendingChange::Insert(task.clone())]))?;

    let result = ctx.block_on(ctx.repository.apply(vec![PendingChange::Insert(task.clone())]));

    assert!(matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()));
    Ok(())
}

#[rstest]
fn status_query_filters_and_orders_newest_first(
    context: Result<PostgresContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = context?;
    let mut first = sample("first");
    std::thread::sleep(std::time::Duration::from_millis(2));
    let mut second = sample("second");
    std::thread::sleep(std::time::Duration::from_millis(2));
    let third = sample("third");
    first.mark_complete(&DefaultClock);
    second.mark_complete(&DefaultClock);
    ctx.block_on(ctx.repository.apply(vec![
        PendingChange::Insert(first.clone()),
        PendingChange::Insert(second.clone()),
        PendingChange::Insert(third.clone()),
    ]))?;

    let completed: Vec<_> = ctx
        .block_on(ctx.repository.list_by_status(TaskStatus::Completed))?
        .iter()
        .map(Task::id)
        .collect();
    assert_eq!(completed, [second.id(), first.id()]);

    let all: Vec<_> = ctx
        .block_on(ctx.repository.list_all())?
        .iter()
        .map(Task::id)
        .collect();
    assert_eq!(all, [third.id(), second.id(), first.id()]);
    Ok(())
}
