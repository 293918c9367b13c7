//! Domain model for the todo list.
//!
//! # Responsibility
//! - Define the single record type persisted by core.
//!
//! # Invariants
//! - Every todo is identified by a stable `TodoId`.
//! - Deletion is a hard delete; there are no tombstones.
//! - "Subtask of" is a text suffix only, never a stored relation.

pub mod todo;
