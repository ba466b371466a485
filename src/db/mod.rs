//! SQLite persistence for tasks.
//!
//! ```rust
//! use tarefas::db::{db::Db, tasks::Tasks};
//! use tarefas::libs::task::NewTask;
//!
//! # fn main() -> anyhow::Result<()> {
//! let db = Db::in_memory()?;
//! let tasks = Tasks::new(&db.conn);
//! let task = tasks.insert(&NewTask::new("Review code"), chrono::Utc::now())?;
//! # Ok(())
//! # }
//! ```

/// Connection setup and default database location.
pub mod db;

/// Versioned schema migrations and migration history.
pub mod migrations;

/// Task queries: filtered listing, CRUD, toggle, statistics and search.
pub mod tasks;
