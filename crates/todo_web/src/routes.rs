//! Routing definitions.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, patch, post};
use axum::Router;
use log::info;

use crate::handlers::{api, page};
use crate::state::AppState;

/// Creates the router serving the page, the JSON API and `/health`.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/todos", get(api::list).post(api::create))
        .route("/todos/{id}", patch(api::update).delete(api::delete))
        .route("/todos/{id}/subtasks", post(api::generate));

    Router::new()
        .route("/", get(page::index))
        .route("/todos", post(page::create))
        .route("/todos/{id}/toggle", post(page::toggle))
        .route("/todos/{id}/delete", post(page::delete))
        .route("/todos/{id}/subtasks", post(page::generate))
        .route("/health", get(api::health))
        .nest("/api", api_routes)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    info!(
        "event=http_request module=web method={} path={} status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}
