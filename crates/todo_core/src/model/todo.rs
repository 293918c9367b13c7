//! Todo domain model.
//!
//! # Invariants
//! - `id` is assigned once at creation and never reused.
//! - `text` is stored verbatim; core never trims or validates it.
//! - `completed` starts as `false`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a todo row.
pub type TodoId = Uuid;

/// One row of the todo list.
///
/// Serialized in camelCase to match the JSON shape served to browsers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
    /// Unix epoch milliseconds, assigned by the database on insert.
    pub created_at: i64,
}

impl Todo {
    /// Value `completed` takes after a toggle of this snapshot.
    pub fn toggled_completed(&self) -> bool {
        !self.completed
    }
}

/// Parses a todo id from its textual form.
///
/// Returns `None` for anything that is not a hyphenated or simple UUID.
pub fn parse_todo_id(value: &str) -> Option<TodoId> {
    Uuid::parse_str(value.trim()).ok()
}
