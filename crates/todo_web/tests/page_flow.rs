mod common;

use std::time::Duration;

use axum::http::{header, StatusCode};
use common::{body_text, form_post, get, send, test_app, test_app_with_store};
use rusqlite::Connection;
use todo_core::db::migrations::apply_migrations;
use todo_core::db::open_db_in_memory;
use todo_web::{CompletionError, StubCompletionClient, TodoStore};

const SUFFIX: &str = "(subtask of: Buy eggs)";

#[tokio::test]
async fn empty_list_renders_placeholder() {
    let app = test_app(StubCompletionClient::with_reply(""));

    let response = send(&app, get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Try adding a todo"));
    assert!(html.contains("action=\"/todos\""));
}

#[tokio::test]
async fn add_form_redirects_back_to_the_list() {
    let app = test_app(StubCompletionClient::with_reply(""));

    let response = send(&app, form_post("/todos", "text=Buy+eggs")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let todos = app.store.list().await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].text, "Buy eggs");
    assert!(!todos[0].completed);
}

#[tokio::test]
async fn empty_text_is_accepted_verbatim() {
    let app = test_app(StubCompletionClient::with_reply(""));

    send(&app, form_post("/todos", "text=")).await;
    send(&app, form_post("/todos", "")).await;

    let todos = app.store.list().await.unwrap();
    assert_eq!(todos.len(), 2);
    assert!(todos.iter().all(|todo| todo.text.is_empty()));
}

#[tokio::test]
async fn buy_eggs_scenario() {
    let app = test_app(StubCompletionClient::with_reply("Go to store\nPick eggs"));

    send(&app, form_post("/todos", "text=Buy+eggs")).await;
    let todos = app.store.list().await.unwrap();
    assert_eq!(todos.len(), 1);
    let parent = todos[0].clone();
    let html = body_text(send(&app, get("/")).await).await;
    assert!(html.contains("Buy eggs"));
    assert!(!html.contains(" checked>"));

    let response = send(
        &app,
        form_post(&format!("/todos/{}/toggle", parent.id), "completed=false"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let html = body_text(send(&app, get("/")).await).await;
    assert_eq!(html.matches(" checked>").count(), 1);

    let response = send(&app, form_post(&format!("/todos/{}/subtasks", parent.id), "")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let todos = app.store.list().await.unwrap();
    assert_eq!(todos.len(), 3);
    let subtasks: Vec<_> = todos.iter().filter(|todo| todo.id != parent.id).collect();
    assert!(subtasks.iter().all(|todo| todo.text.ends_with(SUFFIX)));

    let response = send(&app, form_post(&format!("/todos/{}/delete", parent.id), "")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let todos = app.store.list().await.unwrap();
    assert_eq!(todos.len(), 2);
    assert!(todos.iter().all(|todo| todo.text.ends_with(SUFFIX)));

    let html = body_text(send(&app, get("/")).await).await;
    assert!(html.contains("Go to store (subtask of: Buy eggs)"));
    assert!(html.contains("Pick eggs (subtask of: Buy eggs)"));
}

#[tokio::test]
async fn completion_failure_is_invisible_to_the_page() {
    let app = test_app(StubCompletionClient::with_error(CompletionError::Status {
        status: 500,
        body: "boom".to_string(),
    }));
    let parent = app.store.create("Buy eggs".to_string()).await.unwrap();

    let response = send(&app, form_post(&format!("/todos/{}/subtasks", parent.id), "")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(app.store.list().await.unwrap(), vec![parent]);
    assert_eq!(app.completion.prompts().len(), 1);
}

#[tokio::test]
async fn unknown_or_malformed_ids_still_redirect() {
    let app = test_app(StubCompletionClient::with_reply("Step"));
    let kept = app.store.create("Keep me".to_string()).await.unwrap();
    let missing = uuid::Uuid::new_v4();

    for uri in [
        format!("/todos/{missing}/toggle"),
        format!("/todos/{missing}/delete"),
        format!("/todos/{missing}/subtasks"),
        "/todos/not-an-id/delete".to_string(),
    ] {
        let response = send(&app, form_post(&uri, "")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
    }

    assert_eq!(app.store.list().await.unwrap(), vec![kept]);
    assert!(app.completion.prompts().is_empty());
}

#[tokio::test]
async fn page_escapes_todo_text() {
    let app = test_app(StubCompletionClient::with_reply(""));
    app.store
        .create("<img src=x onerror=alert(1)>".to_string())
        .await
        .unwrap();

    let html = body_text(send(&app, get("/")).await).await;
    assert!(!html.contains("<img src=x"));
    assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
}

#[tokio::test]
async fn toggle_applies_the_rendered_snapshot() {
    let app = test_app(StubCompletionClient::with_reply(""));
    let todo = app.store.create("Buy eggs".to_string()).await.unwrap();

    let html = body_text(send(&app, get("/")).await).await;
    assert!(html.contains("name=\"completed\" value=\"false\""));

    // Another session completes the row after this page was rendered.
    app.store.set_completed(todo.id, true).await.unwrap();

    let uri = format!("/todos/{}/toggle", todo.id);
    let response = send(&app, form_post(&uri, "completed=false")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(app.store.get(todo.id).await.unwrap().unwrap().completed);

    send(&app, form_post(&uri, "completed=true")).await;
    assert!(!app.store.get(todo.id).await.unwrap().unwrap().completed);
}

#[tokio::test]
async fn failed_list_fetch_renders_error_state() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE todos;").unwrap();
    let app = test_app_with_store(
        TodoStore::new(conn),
        StubCompletionClient::with_reply(""),
        None,
    );

    let response = send(&app, get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Error loading todos..."));
    assert!(!html.contains("http-equiv=\"refresh\""));
}

#[tokio::test]
async fn slow_list_fetch_renders_loading_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.sqlite3");

    // Rollback-journal database so an exclusive transaction blocks readers.
    let mut conn = Connection::open(&path).unwrap();
    apply_migrations(&mut conn).unwrap();
    conn.busy_timeout(Duration::from_secs(5)).unwrap();
    let locker = Connection::open(&path).unwrap();
    locker.execute_batch("BEGIN EXCLUSIVE;").unwrap();

    let app = test_app_with_store(
        TodoStore::new(conn),
        StubCompletionClient::with_reply(""),
        Some(Duration::from_millis(100)),
    );

    let response = send(&app, get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Loading..."));
    assert!(html.contains("http-equiv=\"refresh\""));

    locker.execute_batch("COMMIT;").unwrap();
}
