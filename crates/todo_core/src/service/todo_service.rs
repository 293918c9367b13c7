//! Todo use-case service.
//!
//! # Responsibility
//! - Provide the list/create/toggle/delete entry points used by callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Service layer remains storage-agnostic.
//! - Text is passed through untouched; empty or duplicate text is allowed.

use crate::model::todo::{Todo, TodoId};
use crate::repo::todo_repo::{RepoResult, TodoRepository};

/// Use-case service wrapper for todo CRUD operations.
pub struct TodoService<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every todo in insertion order.
    pub fn list_todos(&self) -> RepoResult<Vec<Todo>> {
        self.repo.list_todos()
    }

    /// Creates an unchecked todo and returns it as persisted.
    pub fn create_todo(&self, text: &str) -> RepoResult<Todo> {
        self.repo.create_todo(text)
    }

    pub fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        self.repo.get_todo(id)
    }

    /// Persists the flipped `completed` value of the given snapshot.
    ///
    /// # Contract
    /// - The new value is computed from `todo`, not from the stored row, so
    ///   concurrent toggles resolve as last write wins.
    /// - Returns `NotFound` when the row was deleted in the meantime.
    pub fn toggle_todo(&self, todo: &Todo) -> RepoResult<Todo> {
        self.repo.set_completed(todo.id, todo.toggled_completed())
    }

    /// Sets `completed` to an explicit value.
    pub fn set_completed(&self, id: TodoId, completed: bool) -> RepoResult<Todo> {
        self.repo.set_completed(id, completed)
    }

    /// Hard-deletes one todo. Subtasks created from it are left alone.
    pub fn delete_todo(&self, id: TodoId) -> RepoResult<()> {
        self.repo.delete_todo(id)
    }
}
