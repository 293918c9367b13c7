//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Hold the pure rules that turn a completion reply into subtask texts.

pub mod subtask_plan;
pub mod todo_service;
