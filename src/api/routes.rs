//! Router construction for the task API.

use super::handlers;
use crate::task::{ports::TaskRepository, services::TaskLifecycleService};
use axum::Router;
use axum::routing::{get, patch};
use mockable::Clock;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Version prefix shared by every task route.
pub const API_PREFIX: &str = "/api/v1";

/// Builds the application router.
///
/// Task routes are nested under [`API_PREFIX`]; `/health` sits at the root.
/// CORS is permissive so the browser client can call the API from any
/// origin.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use mockable::DefaultClock;
/// use tasklane::api::router;
/// use tasklane::task::{adapters::memory::InMemoryTaskRepository, services::TaskLifecycleService};
///
/// let service = TaskLifecycleService::new(
///     Arc::new(InMemoryTaskRepository::new()),
///     Arc::new(DefaultClock),
/// );
/// let _app = router(service);
/// ```
pub fn router<R, C>(service: TaskLifecycleService<R, C>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let tasks = Router::new()
        .route(
            "/tasks",
            get(handlers::list_tasks::<R, C>).post(handlers::create_task::<R, C>),
        )
        .route(
            "/tasks/{id}",
            get(handlers::get_task::<R, C>)
                .put(handlers::update_task::<R, C>)
                .delete(handlers::delete_task::<R, C>),
        )
        .route(
            "/tasks/status/{status}",
            get(handlers::list_tasks_by_status::<R, C>),
        )
        .route(
            "/tasks/{id}/complete",
            patch(handlers::mark_complete::<R, C>),
        )
        .route(
            "/tasks/{id}/incomplete",
            patch(handlers::mark_incomplete::<R, C>),
        )
        .route(
            "/tasks/{id}/inprogress",
            patch(handlers::mark_in_progress::<R, C>),
        )
        .with_state(Arc::new(service));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest(API_PREFIX, tasks)
        .route("/health", get(handlers::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
