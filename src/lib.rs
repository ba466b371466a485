//! # Tarefas - task list API and client
//!
//! A small to-do application: an HTTP JSON API over SQLite, and a terminal
//! client that mirrors the server's task list in an observable cache.
//!
//! ## Features
//!
//! - **Task API**: filtered and paginated listing, CRUD, completion toggle,
//!   statistics and free-text search under `/api`
//! - **Validation**: per-field error maps with Portuguese messages
//! - **Client Gateway**: base URL handling, JSON headers, normalized errors
//! - **Task Cache**: a `watch` channel patched after every confirmed mutation
//! - **Terminal UI**: form, list and item components driven by the CLI
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tarefas::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
pub mod server;
pub mod ui;
