//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for todos.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Read paths reject malformed persisted rows instead of masking them.

pub mod todo_repo;
