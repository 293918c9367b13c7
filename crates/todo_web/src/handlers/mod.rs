//! Request handlers.
//!
//! `page` serves the HTML form surface, `api` the JSON surface. Both share
//! the store and the completion fan-out through `AppState`.

pub mod api;
pub mod page;

use todo_core::{parse_todo_id, TodoId};

use crate::error::ApiError;

fn parse_path_id(raw: &str) -> Result<TodoId, ApiError> {
    parse_todo_id(raw).ok_or_else(|| ApiError::bad_request(format!("invalid todo id `{raw}`")))
}
