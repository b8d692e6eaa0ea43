//! Shared plumbing for HTTP integration tests.

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use eyre::Result;
use http_body_util::BodyExt;
use mockable::DefaultClock;
use rstest::fixture;
use serde_json::Value;
use std::sync::Arc;
use tasklane::api::router;
use tasklane::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskId, TaskStatus},
    ports::{PendingChange, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    services::TaskLifecycleService,
};
use tower::ServiceExt;

/// Decoded response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Router over an empty in-memory store.
#[fixture]
pub fn app() -> Router {
    router(TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    ))
}

/// Repository whose every call fails with a storage error.
pub struct UnavailableRepository;

fn unavailable() -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other("database unavailable"))
}

#[async_trait]
impl TaskRepository for UnavailableRepository {
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        Err(unavailable())
    }

    async fn list_by_status(&self, _status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        Err(unavailable())
    }

    async fn apply(&self, _changes: Vec<PendingChange>) -> TaskRepositoryResult<usize> {
        Err(unavailable())
    }
}

/// Router whose storage is down.
#[fixture]
pub fn broken_app() -> Router {
    router(TaskLifecycleService::new(
        Arc::new(UnavailableRepository),
        Arc::new(DefaultClock),
    ))
}

/// Sends a request with an optional JSON body.
pub async fn send(app: &Router, method: Method, uri: &str, json: Option<Value>) -> Result<TestResponse> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match json {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&payload)?))?,
        None => builder.body(Body::empty())?,
    };
    send_request(app, request).await
}

/// Sends a prebuilt request.
pub async fn send_request(app: &Router, request: Request<Body>) -> Result<TestResponse> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await?.to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok(TestResponse {
        status,
        headers,
        body,
    })
}

/// Creates a task and returns its identifier.
pub async fn create(app: &Router, title: &str) -> Result<String> {
    let response = send(
        app,
        Method::POST,
        "/api/v1/tasks",
        Some(serde_json::json!({ "title": title })),
    )
    .await?;
    eyre::ensure!(
        response.status == StatusCode::CREATED,
        "create returned {}",
        response.status
    );
    response.body["id"]
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| eyre::eyre!("created task has no id"))
}
