//! Task operations used by the HTTP handlers and the CLI.
//!
//! [`TaskService`] owns the single SQLite connection behind a
//! `parking_lot::Mutex`. Every mutation runs inside its own transaction: the
//! transaction commits only when the store call succeeds, and is rolled back
//! on drop otherwise. Reads run directly on the connection.

use crate::db::tasks::Tasks;
use crate::libs::error::TaskError;
use crate::libs::task::{NewTask, Page, Task, TaskQuery, TaskStats};
use crate::libs::validation::{validate_new_task, validate_task_changes};
use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::Connection;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct TaskService {
    conn: Arc<Mutex<Connection>>,
}

impl TaskService {
    pub fn new(conn: Connection) -> Self {
        TaskService {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    pub fn list(&self, query: &TaskQuery) -> Result<Page<Task>, TaskError> {
        let conn = self.conn.lock();
        Tasks::new(&conn).list(query)
    }

    pub fn get(&self, id: i64) -> Result<Task, TaskError> {
        let conn = self.conn.lock();
        Tasks::new(&conn).find(id)
    }

    pub fn create(&self, input: &Map<String, Value>) -> Result<Task, TaskError> {
        let now = Utc::now();
        let result = validate_new_task(input, now)
            .map_err(TaskError::from)
            .and_then(|new_task| self.transaction(|tasks| tasks.insert(&new_task, now)));
        log_outcome("create", None, &result);
        result
    }

    /// The id is checked before the payload, so an unknown id wins over bad input.
    pub fn update(&self, id: i64, input: &Map<String, Value>) -> Result<Task, TaskError> {
        let result = self.get(id).and_then(|_| {
            let changes = validate_task_changes(input)?;
            self.transaction(|tasks| tasks.update(id, &changes, Utc::now()))
        });
        log_outcome("update", Some(id), &result);
        result
    }

    pub fn delete(&self, id: i64) -> Result<(), TaskError> {
        let result = self.transaction(|tasks| tasks.delete(id));
        log_outcome("delete", Some(id), &result);
        result
    }

    pub fn toggle(&self, id: i64) -> Result<Task, TaskError> {
        let result = self.transaction(|tasks| tasks.toggle(id, Utc::now()));
        log_outcome("toggle", Some(id), &result);
        result
    }

    pub fn stats(&self) -> Result<TaskStats, TaskError> {
        let conn = self.conn.lock();
        Tasks::new(&conn).stats(Utc::now())
    }

    pub fn search(&self, term: &str) -> Result<Vec<Task>, TaskError> {
        let conn = self.conn.lock();
        Tasks::new(&conn).search(term)
    }

    /// Inserts all tasks in one transaction.
    pub fn seed(&self, new_tasks: &[NewTask]) -> Result<Vec<Task>, TaskError> {
        let now = Utc::now();
        let result = self.transaction(|tasks| {
            new_tasks
                .iter()
                .map(|task| tasks.insert(task, now))
                .collect::<Result<Vec<_>, _>>()
        });
        match &result {
            Ok(created) => info!(count = created.len(), "tasks seeded"),
            Err(e) => error!(error = %e, "seeding tasks failed"),
        }
        result
    }

    fn transaction<T>(&self, f: impl FnOnce(&Tasks) -> Result<T, TaskError>) -> Result<T, TaskError> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let value = f(&Tasks::new(&tx))?;
        tx.commit()?;
        Ok(value)
    }
}

fn log_outcome<T>(operation: &str, id: Option<i64>, result: &Result<T, TaskError>)
where
    T: TaskId,
{
    match result {
        Ok(value) => info!(operation, id = value.task_id().or(id), "task {} succeeded", operation),
        Err(TaskError::Validation(errors)) => debug!(operation, id, fields = %errors, "task {} rejected", operation),
        Err(TaskError::NotFound(missing)) => debug!(operation, id = missing, "task {} on missing id", operation),
        Err(TaskError::Database(e)) => error!(operation, id, error = %e, "task {} failed", operation),
    }
}

trait TaskId {
    fn task_id(&self) -> Option<i64>;
}

impl TaskId for Task {
    fn task_id(&self) -> Option<i64> {
        Some(self.id)
    }
}

impl TaskId for () {
    fn task_id(&self) -> Option<i64> {
        None
    }
}
