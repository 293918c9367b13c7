//! Core domain logic for the todo list.
//! This crate owns persistence and the rules for deriving subtasks.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::todo::{parse_todo_id, Todo, TodoId};
pub use repo::todo_repo::{RepoError, RepoResult, SqliteTodoRepository, TodoRepository};
pub use service::subtask_plan::{
    build_prompt, parse_subtask_lines, plan_subtasks, subtask_text, SUBTASK_MAX_TOKENS,
    SUBTASK_TEMPERATURE,
};
pub use service::todo_service::TodoService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
