mod common;

use axum::http::StatusCode;
use common::{body_json, get, json_request, send, test_app};
use serde_json::json;
use todo_web::{CompletionError, StubCompletionClient};

#[tokio::test]
async fn health_reports_version() {
    let app = test_app(StubCompletionClient::with_reply(""));

    let response = send(&app, get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], todo_core::core_version());
}

#[tokio::test]
async fn create_then_list_returns_one_unchecked_entry() {
    let app = test_app(StubCompletionClient::with_reply(""));

    let response = send(
        &app,
        json_request("POST", "/api/todos", Some(json!({ "text": "Buy eggs" }))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["text"], "Buy eggs");
    assert_eq!(created["completed"], false);

    let listed = body_json(send(&app, get("/api/todos")).await).await;
    let items = listed.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], created["id"]);
}

#[tokio::test]
async fn patch_sets_completed_and_is_reflected_in_list() {
    let app = test_app(StubCompletionClient::with_reply(""));
    let todo = app.store.create("Buy eggs".to_string()).await.unwrap();
    let uri = format!("/api/todos/{}", todo.id);

    let response = send(&app, json_request("PATCH", &uri, Some(json!({ "completed": true })))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["completed"], true);
    assert!(app.store.list().await.unwrap()[0].completed);

    let response = send(&app, json_request("PATCH", &uri, Some(json!({ "completed": false })))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!app.store.list().await.unwrap()[0].completed);
}

#[tokio::test]
async fn delete_removes_only_the_target() {
    let app = test_app(StubCompletionClient::with_reply(""));
    let doomed = app.store.create("Buy eggs".to_string()).await.unwrap();
    let kept = app.store.create("Walk dog".to_string()).await.unwrap();

    let response = send(
        &app,
        json_request("DELETE", &format!("/api/todos/{}", doomed.id), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(
        &app,
        json_request("DELETE", &format!("/api/todos/{}", doomed.id), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");

    assert_eq!(app.store.list().await.unwrap(), vec![kept]);
}

#[tokio::test]
async fn malformed_input_is_a_bad_request() {
    let app = test_app(StubCompletionClient::with_reply(""));

    let response = send(&app, json_request("DELETE", "/api/todos/42", None)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        json_request("POST", "/api/todos", Some(json!({ "title": "wrong field" }))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn generate_reports_counts() {
    let app = test_app(StubCompletionClient::with_reply("Go to store\n\nPick eggs\n"));
    let parent = app.store.create("Buy eggs".to_string()).await.unwrap();

    let response = send(
        &app,
        json_request("POST", &format!("/api/todos/{}/subtasks", parent.id), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "requested": 2, "created": 2, "failed": 0 })
    );
    assert_eq!(app.store.list().await.unwrap().len(), 3);
}

#[tokio::test]
async fn generate_surfaces_completion_failure_as_bad_gateway() {
    let app = test_app(StubCompletionClient::with_error(CompletionError::MissingApiKey));
    let parent = app.store.create("Buy eggs".to_string()).await.unwrap();

    let response = send(
        &app,
        json_request("POST", &format!("/api/todos/{}/subtasks", parent.id), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "COMPLETION_FAILED");
}

#[tokio::test]
async fn generate_for_unknown_parent_is_not_found() {
    let app = test_app(StubCompletionClient::with_reply("Step"));

    let response = send(
        &app,
        json_request(
            "POST",
            &format!("/api/todos/{}/subtasks", uuid::Uuid::new_v4()),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(app.completion.prompts().is_empty());
}
