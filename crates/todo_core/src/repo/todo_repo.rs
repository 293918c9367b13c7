//! Todo repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/read/update/delete over the `todos` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Every write returns the row as persisted, read back via `RETURNING`.
//! - Listing order is insertion order (`created_at`, then `rowid`).
//! - No statement spans more than one row mutation.

use crate::db::DbError;
use crate::model::todo::{Todo, TodoId};
use rusqlite::{params, Connection, Params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TODO_COLUMNS: &str = "id, text, completed, created_at";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for todo persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(TodoId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted todo data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for todo CRUD operations.
pub trait TodoRepository {
    /// Inserts one row with `completed = false` and a fresh id.
    fn create_todo(&self, text: &str) -> RepoResult<Todo>;
    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>>;
    fn list_todos(&self) -> RepoResult<Vec<Todo>>;
    /// Overwrites `completed` for one row; last write wins.
    fn set_completed(&self, id: TodoId, completed: bool) -> RepoResult<Todo>;
    /// Hard-deletes one row. Other rows are never touched.
    fn delete_todo(&self, id: TodoId) -> RepoResult<()>;
}

/// SQLite-backed todo repository.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn fetch_optional<P: Params>(&self, sql: &str, params: P) -> RepoResult<Option<Todo>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_todo_row(row)?));
        }

        Ok(None)
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn create_todo(&self, text: &str) -> RepoResult<Todo> {
        let id = Uuid::new_v4();
        self.fetch_optional(
            &format!(
                "INSERT INTO todos (id, text, completed)
                 VALUES (?1, ?2, 0)
                 RETURNING {TODO_COLUMNS};"
            ),
            params![id.to_string(), text],
        )?
        .ok_or_else(|| RepoError::InvalidData(format!("insert of todo {id} returned no row")))
    }

    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        self.fetch_optional(
            &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1;"),
            [id.to_string()],
        )
    }

    fn list_todos(&self) -> RepoResult<Vec<Todo>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TODO_COLUMNS} FROM todos ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut todos = Vec::new();

        while let Some(row) = rows.next()? {
            todos.push(parse_todo_row(row)?);
        }

        Ok(todos)
    }

    fn set_completed(&self, id: TodoId, completed: bool) -> RepoResult<Todo> {
        self.fetch_optional(
            &format!(
                "UPDATE todos
                 SET completed = ?1
                 WHERE id = ?2
                 RETURNING {TODO_COLUMNS};"
            ),
            params![bool_to_int(completed), id.to_string()],
        )?
        .ok_or(RepoError::NotFound(id))
    }

    fn delete_todo(&self, id: TodoId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM todos WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_todo_row(row: &Row<'_>) -> RepoResult<Todo> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in todos.id"))
    })?;

    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in todos.completed"
            )));
        }
    };

    Ok(Todo {
        id,
        text: row.get("text")?,
        completed,
        created_at: row.get("created_at")?,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
