//! Async handle over the SQLite todo store.
//!
//! # Invariants
//! - One connection, guarded by a mutex; statements serialize, but nothing
//!   holds the lock across two operations.
//! - Every call runs on the blocking pool, never on a runtime worker.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use todo_core::db::{open_db, open_db_in_memory, DbError};
use todo_core::{RepoError, RepoResult, SqliteTodoRepository, Todo, TodoId, TodoService};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Repo(RepoError),
    /// The blocking task panicked or was cancelled.
    Join(String),
    /// A previous holder of the connection lock panicked.
    Poisoned,
}

impl StoreError {
    /// Returns the id when the failure means "no such todo".
    pub fn not_found_id(&self) -> Option<TodoId> {
        match self {
            Self::Repo(RepoError::NotFound(id)) => Some(*id),
            _ => None,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Join(message) => write!(f, "store task failed: {message}"),
            Self::Poisoned => write!(f, "store connection lock is poisoned"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Join(_) | Self::Poisoned => None,
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Cloneable, async-friendly todo store.
#[derive(Clone)]
pub struct TodoStore {
    conn: Arc<Mutex<Connection>>,
}

impl TodoStore {
    /// Wraps an already migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        open_db(path).map(Self::new)
    }

    pub fn open_in_memory() -> Result<Self, DbError> {
        open_db_in_memory().map(Self::new)
    }

    pub async fn list(&self) -> StoreResult<Vec<Todo>> {
        self.run(|service| service.list_todos()).await
    }

    pub async fn create(&self, text: String) -> StoreResult<Todo> {
        self.run(move |service| service.create_todo(&text)).await
    }

    pub async fn get(&self, id: TodoId) -> StoreResult<Option<Todo>> {
        self.run(move |service| service.get_todo(id)).await
    }

    pub async fn set_completed(&self, id: TodoId, completed: bool) -> StoreResult<Todo> {
        self.run(move |service| service.set_completed(id, completed))
            .await
    }

    pub async fn delete(&self, id: TodoId) -> StoreResult<()> {
        self.run(move |service| service.delete_todo(id)).await
    }

    async fn run<T, F>(&self, op: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: for<'c> FnOnce(&TodoService<SqliteTodoRepository<'c>>) -> RepoResult<T>
            + Send
            + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| StoreError::Poisoned)?;
            let service = TodoService::new(SqliteTodoRepository::new(&guard));
            op(&service).map_err(StoreError::from)
        })
        .await
        .map_err(|err| StoreError::Join(err.to_string()))?
    }
}
