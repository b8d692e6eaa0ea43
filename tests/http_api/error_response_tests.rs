//! Error bodies returned by the task API.

use crate::http_api::helpers::{app, broken_app, send, send_request};
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::{Duration, Utc};
use eyre::{Result, ensure};
use rstest::rstest;
use serde_json::json;
use uuid::Uuid;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_title_is_reported_per_field(app: Router) -> Result<()> {
    let response = send(&app, Method::POST, "/api/v1/tasks", Some(json!({ "title": "  " }))).await?;

    ensure!(response.status == StatusCode::BAD_REQUEST);
    ensure!(
        response.body
            == json!({ "errors": [{ "field": "title", "message": "Title is required" }] })
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_title_counts_as_empty(app: Router) -> Result<()> {
    let response = send(
        &app,
        Method::POST,
        "/api/v1/tasks",
        Some(json!({ "description": "no title" })),
    )
    .await?;
    ensure!(response.status == StatusCode::BAD_REQUEST);
    ensure!(response.body["errors"][0]["field"] == "title");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_invalid_field_is_listed(app: Router) -> Result<()> {
    let response = send(
        &app,
        Method::POST,
        "/api/v1/tasks",
        Some(json!({
            "title": "t".repeat(201),
            "description": "d".repeat(1001),
            "dueDate": Utc::now() - Duration::days(1),
        })),
    )
    .await?;

    ensure!(response.status == StatusCode::BAD_REQUEST);
    ensure!(
        response.body
            == json!({ "errors": [
                { "field": "title", "message": "Title must not exceed 200 characters" },
                { "field": "description", "message": "Description must not exceed 1000 characters" },
                { "field": "dueDate", "message": "Due date must be in the future" },
            ] })
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_task_is_not_found_with_message(app: Router) -> Result<()> {
    let id = Uuid::new_v4();
    let response = send(&app, Method::GET, &format!("/api/v1/tasks/{id}"), None).await?;

    ensure!(response.status == StatusCode::NOT_FOUND);
    ensure!(response.body == json!({ "message": format!("Task with ID {id} was not found.") }));
    Ok(())
}

#[rstest]
#[case(Method::GET, "")]
#[case(Method::DELETE, "")]
#[case(Method::PATCH, "/complete")]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_identifier_is_rejected(
    app: Router,
    #[case] method: Method,
    #[case] suffix: &str,
) -> Result<()> {
    let response = send(&app, method, &format!("/api/v1/tasks/not-a-uuid{suffix}"), None).await?;

    ensure!(response.status == StatusCode::BAD_REQUEST);
    ensure!(response.body["errors"][0]["field"] == "id");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_with_bad_id_and_blank_title_lists_both(app: Router) -> Result<()> {
    let nil = Uuid::nil();
    let response = send(
        &app,
        Method::PUT,
        &format!("/api/v1/tasks/{nil}"),
        Some(json!({ "title": "" })),
    )
    .await?;

    ensure!(response.status == StatusCode::BAD_REQUEST);
    let fields: Vec<_> = response.body["errors"]
        .as_array()
        .map(|errors| errors.iter().filter_map(|error| error["field"].as_str()).collect())
        .unwrap_or_default();
    ensure!(fields == ["id", "title"], "got {fields:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn out_of_range_status_is_a_validation_error(app: Router) -> Result<()> {
    let response = send(&app, Method::GET, "/api/v1/tasks/status/999", None).await?;

    ensure!(response.status == StatusCode::BAD_REQUEST);
    ensure!(
        response.body
            == json!({ "errors": [{
                "field": "status",
                "message": "Passed value is not part of Status Values",
            }] })
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_numeric_status_lists_valid_values(app: Router) -> Result<()> {
    let response = send(&app, Method::GET, "/api/v1/tasks/status/done", None).await?;

    ensure!(response.status == StatusCode::BAD_REQUEST);
    ensure!(
        response.body["message"]
            == "Invalid status value. Valid values are: 0 (NotStarted), 1 (InProgress), 2 (Completed)."
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_json_is_a_bad_request(app: Router) -> Result<()> {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/tasks")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))?;

    let response = send_request(&app, request).await?;

    ensure!(response.status == StatusCode::BAD_REQUEST);
    ensure!(response.body["message"].is_string());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn storage_failure_hides_details(broken_app: Router) -> Result<()> {
    let response = send(
        &broken_app,
        Method::POST,
        "/api/v1/tasks",
        Some(json!({ "title": "Lost" })),
    )
    .await?;

    ensure!(response.status == StatusCode::INTERNAL_SERVER_ERROR);
    ensure!(
        response.body
            == json!({ "message": "An unexpected error occurred while processing the request." })
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn read_failure_uses_same_generic_message(broken_app: Router) -> Result<()> {
    let response = send(&broken_app, Method::GET, "/api/v1/tasks", None).await?;

    ensure!(response.status == StatusCode::INTERNAL_SERVER_ERROR);
    ensure!(
        response.body
            == json!({ "message": "An unexpected error occurred while processing the request." })
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn validation_runs_before_storage(broken_app: Router) -> Result<()> {
    let response = send(&broken_app, Method::GET, "/api/v1/tasks/status/5", None).await?;
    ensure!(response.status == StatusCode::BAD_REQUEST);
    Ok(())
}
