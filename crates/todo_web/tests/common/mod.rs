//! Shared fixtures for router tests.
//!
//! Each integration test file compiles this module separately, so helpers
//! unused by one file are expected.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use todo_web::{create_router, AppState, StubCompletionClient, TodoStore};
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub store: TodoStore,
    pub completion: Arc<StubCompletionClient>,
}

/// Router over a fresh in-memory store and the given completion stub.
pub fn test_app(completion: StubCompletionClient) -> TestApp {
    test_app_with_store(TodoStore::open_in_memory().unwrap(), completion, None)
}

/// Router over the given store, optionally with a custom list timeout.
pub fn test_app_with_store(
    store: TodoStore,
    completion: StubCompletionClient,
    list_timeout: Option<Duration>,
) -> TestApp {
    let completion = Arc::new(completion);
    let mut state = AppState::new(store.clone(), completion.clone());
    if let Some(list_timeout) = list_timeout {
        state = state.with_list_timeout(list_timeout);
    }
    TestApp {
        router: create_router(state),
        store,
        completion,
    }
}

pub async fn send(app: &TestApp, request: Request<Body>) -> Response<Body> {
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
