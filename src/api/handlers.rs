//! Axum handlers, one per task endpoint.

use super::dto::{CreateTaskDto, HealthDto, TaskDto, UpdateTaskDto};
use super::error::{ApiError, INVALID_STATUS_MESSAGE};
use super::routes::API_PREFIX;
use crate::task::{ports::TaskRepository, services::TaskLifecycleService};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use chrono::Utc;
use mockable::Clock;
use std::sync::Arc;

/// Shared service handle extracted by every task handler.
pub(super) type Service<R, C> = State<Arc<TaskLifecycleService<R, C>>>;

type ApiResult<T> = Result<T, ApiError>;

fn into_dtos(tasks: Vec<crate::task::domain::Task>) -> Vec<TaskDto> {
    tasks.into_iter().map(TaskDto::from).collect()
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

pub(super) async fn list_tasks<R, C>(State(service): Service<R, C>) -> ApiResult<Json<Vec<TaskDto>>>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let tasks = service.list_all().await?;
    Ok(Json(into_dtos(tasks)))
}

pub(super) async fn get_task<R, C>(
    State(service): Service<R, C>,
    Path(id): Path<String>,
) -> ApiResult<Json<TaskDto>>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task = service.get_by_id(&id).await?;
    Ok(Json(TaskDto::from(task)))
}

pub(super) async fn list_tasks_by_status<R, C>(
    State(service): Service<R, C>,
    Path(status): Path<String>,
) -> ApiResult<Json<Vec<TaskDto>>>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let code = status
        .trim()
        .parse::<i64>()
        .map_err(|_| ApiError::BadRequest(INVALID_STATUS_MESSAGE.to_owned()))?;
    let tasks = service.list_by_status(code).await?;
    Ok(Json(into_dtos(tasks)))
}

pub(super) async fn create_task<R, C>(
    State(service): Service<R, C>,
    payload: Result<Json<CreateTaskDto>, JsonRejection>,
) -> ApiResult<impl IntoResponse>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let request = body(payload)?;
    let task = service.create(request.into()).await?;
    let location = format!("{API_PREFIX}/tasks/{}", task.id());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(TaskDto::from(task)),
    ))
}

pub(super) async fn update_task<R, C>(
    State(service): Service<R, C>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskDto>, JsonRejection>,
) -> ApiResult<Json<TaskDto>>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let request = body(payload)?;
    let task = service.update(&id, request.into()).await?;
    Ok(Json(TaskDto::from(task)))
}

pub(super) async fn delete_task<R, C>(
    State(service): Service<R, C>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn mark_complete<R, C>(
    State(service): Service<R, C>,
    Path(id): Path<String>,
) -> ApiResult<Json<TaskDto>>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task = service.mark_complete(&id).await?;
    Ok(Json(TaskDto::from(task)))
}

pub(super) async fn mark_incomplete<R, C>(
    State(service): Service<R, C>,
    Path(id): Path<String>,
) -> ApiResult<Json<TaskDto>>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task = service.mark_incomplete(&id).await?;
    Ok(Json(TaskDto::from(task)))
}

pub(super) async fn mark_in_progress<R, C>(
    State(service): Service<R, C>,
    Path(id): Path<String>,
) -> ApiResult<Json<TaskDto>>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task = service.mark_in_progress(&id).await?;
    Ok(Json(TaskDto::from(task)))
}

pub(super) async fn health() -> Json<HealthDto> {
    Json(HealthDto {
        status: "healthy".to_owned(),
        timestamp: Utc::now(),
    })
}
