//! HTML form surface.
//!
//! Every mutation answers with `303 See Other` to `/`, so the browser
//! re-fetches the whole list. Failures are logged and otherwise invisible:
//! the page simply shows whatever the store holds on the next render.

use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::Form;
use log::{debug, error, info, warn};
use serde::Deserialize;
use todo_core::{parse_todo_id, TodoId};

use crate::state::AppState;
use crate::subtasks::generate_subtasks;
use crate::view::{render_page, ListView};

#[derive(Debug, Deserialize)]
pub struct NewTodoForm {
    #[serde(default)]
    pub text: String,
}

/// Toggle form body; `completed` is the value the page was rendered with.
#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    #[serde(default)]
    pub completed: bool,
}

/// `GET /`
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let list = match tokio::time::timeout(state.list_timeout, state.store.list()).await {
        Ok(Ok(todos)) => ListView::Ready(todos),
        Ok(Err(err)) => {
            error!("event=todo_list module=web status=error error={err}");
            ListView::Error
        }
        Err(_) => {
            warn!(
                "event=todo_list module=web status=timeout timeout_ms={}",
                state.list_timeout.as_millis()
            );
            ListView::Loading
        }
    };

    Html(render_page(&list))
}

/// `POST /todos`
pub async fn create(State(state): State<AppState>, Form(form): Form<NewTodoForm>) -> Redirect {
    match state.store.create(form.text).await {
        Ok(todo) => info!("event=todo_create module=web status=ok id={}", todo.id),
        Err(err) => error!("event=todo_create module=web status=error error={err}"),
    }
    Redirect::to("/")
}

/// `POST /todos/{id}/toggle`
///
/// Writes `!completed` of the rendered snapshot, so the last submitted
/// toggle wins over whatever another session stored meanwhile.
pub async fn toggle(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(form): Form<ToggleForm>,
) -> Redirect {
    let Some(id) = path_id("todo_toggle", &raw_id) else {
        return Redirect::to("/");
    };

    match state.store.set_completed(id, !form.completed).await {
        Ok(todo) => info!(
            "event=todo_toggle module=web status=ok id={} completed={}",
            todo.id, todo.completed
        ),
        Err(err) if err.not_found_id().is_some() => {
            warn!("event=todo_toggle module=web status=not_found id={id}");
        }
        Err(err) => error!("event=todo_toggle module=web status=error id={id} error={err}"),
    }
    Redirect::to("/")
}

/// `POST /todos/{id}/delete`
pub async fn delete(State(state): State<AppState>, Path(raw_id): Path<String>) -> Redirect {
    let Some(id) = path_id("todo_delete", &raw_id) else {
        return Redirect::to("/");
    };

    match state.store.delete(id).await {
        Ok(()) => info!("event=todo_delete module=web status=ok id={id}"),
        Err(err) if err.not_found_id().is_some() => {
            warn!("event=todo_delete module=web status=not_found id={id}");
        }
        Err(err) => error!("event=todo_delete module=web status=error id={id} error={err}"),
    }
    Redirect::to("/")
}

/// `POST /todos/{id}/subtasks`
///
/// Completion and insert failures only reach the log.
pub async fn generate(State(state): State<AppState>, Path(raw_id): Path<String>) -> Redirect {
    let Some(id) = path_id("subtasks_generate", &raw_id) else {
        return Redirect::to("/");
    };

    match state.store.get(id).await {
        Ok(Some(parent)) => {
            match generate_subtasks(&state.store, state.completion.as_ref(), &parent).await {
                Ok(report) => debug!(
                    "event=subtasks_page module=web status=ok id={id} created={} failed={}",
                    report.created, report.failed
                ),
                Err(err) => {
                    debug!("event=subtasks_page module=web status=error id={id} error={err}");
                }
            }
        }
        Ok(None) => warn!("event=subtasks_generate module=web status=not_found id={id}"),
        Err(err) => {
            error!("event=subtasks_generate module=web status=error id={id} error={err}");
        }
    }
    Redirect::to("/")
}

fn path_id(event: &str, raw_id: &str) -> Option<TodoId> {
    let id = parse_todo_id(raw_id);
    if id.is_none() {
        warn!("event={event} module=web status=invalid_id");
    }
    id
}
