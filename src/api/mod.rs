//! Client side of the task API.
//!
//! [`gateway::Gateway`] is the only place that performs HTTP requests; the
//! task cache and the CLI client commands go through it.

pub mod gateway;

pub use gateway::{Gateway, GatewayError};

/// Path of the task collection, relative to the API base URL.
pub const TASKS_PATH: &str = "/api/tarefas";
pub const STATISTICS_PATH: &str = "/api/estatisticas";
pub const SEARCH_PATH: &str = "/api/buscar";

pub fn task_path(id: i64) -> String {
    format!("{}/{}", TASKS_PATH, id)
}
