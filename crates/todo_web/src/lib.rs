//! HTTP surface for the todo list.
//!
//! Serves the server-rendered page, a small JSON API, and the
//! "generate subtasks" action that fans a completion reply out into new
//! todos. Persistence rules live in `todo_core`.

pub mod completion;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;
pub mod subtasks;
pub mod view;

pub use completion::{
    CompletionClient, CompletionError, OpenAiCompletionClient, StubCompletionClient,
};
pub use config::{AppConfig, CompletionConfig, ConfigError};
pub use error::ApiError;
pub use routes::create_router;
pub use server::{Server, ServerConfig};
pub use state::AppState;
pub use store::{StoreError, StoreResult, TodoStore};
pub use subtasks::{generate_subtasks, FanOutReport};
