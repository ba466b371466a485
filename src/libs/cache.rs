//! Client-side task cache.
//!
//! [`TaskCache`] mirrors the server's task list in a `tokio::sync::watch`
//! channel. Subscribers see a new snapshot after every change. The cached list
//! only changes once the server has confirmed the corresponding request, so a
//! failed call leaves it exactly as it was.
//!
//! ```rust,no_run
//! use tarefas::api::Gateway;
//! use tarefas::libs::cache::TaskCache;
//! use tarefas::libs::task::CreateTaskRequest;
//!
//! # async fn run() -> Result<(), tarefas::api::GatewayError> {
//! let cache = TaskCache::new(Gateway::new("http://localhost:8001"));
//! let mut updates = cache.subscribe();
//!
//! cache.load().await?;
//! cache.create(&CreateTaskRequest { title: "Comprar leite".into() }).await?;
//! assert!(updates.has_changed().unwrap_or(false));
//! # Ok(())
//! # }
//! ```

use crate::api::{task_path, Gateway, GatewayError, TASKS_PATH};
use crate::libs::envelope::ApiResponse;
use crate::libs::task::{CreateTaskRequest, Task, UpdateTaskRequest};
use serde_json::{Map, Value};
use tokio::sync::watch;

pub struct TaskCache {
    gateway: Gateway,
    state: watch::Sender<Vec<Task>>,
}

impl TaskCache {
    pub fn new(gateway: Gateway) -> Self {
        let (state, _) = watch::channel(Vec::new());
        TaskCache { gateway, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Task>> {
        self.state.subscribe()
    }

    /// Snapshot of the cached list.
    pub fn tasks(&self) -> Vec<Task> {
        self.state.borrow().clone()
    }

    /// Replaces the cached list with the server's. A non-success envelope
    /// empties it.
    pub async fn load(&self) -> Result<Vec<Task>, GatewayError> {
        let response: ApiResponse<Vec<Task>> = self.gateway.get(TASKS_PATH).await?;
        let tasks = match response {
            ApiResponse { success: true, data: Some(tasks), .. } => tasks,
            _ => Vec::new(),
        };
        self.state.send_replace(tasks.clone());
        Ok(tasks)
    }

    /// Creates a task and prepends the confirmed record.
    ///
    /// A confirmed record without a numeric id cannot be placed in the list,
    /// so the whole list is reloaded instead and `None` is returned.
    pub async fn create(&self, request: &CreateTaskRequest) -> Result<Option<Task>, GatewayError> {
        let response: Value = self.gateway.post(TASKS_PATH, request).await?;
        let mut record = match unwrap_data(response) {
            Value::Object(record) => record,
            _ => Map::new(),
        };
        if record.get("title").map_or(true, Value::is_null) {
            record.insert("title".to_string(), Value::String(request.title.clone()));
        }

        let has_numeric_id = record.get("id").is_some_and(Value::is_i64);
        let task = match serde_json::from_value::<Task>(Value::Object(record)) {
            Ok(task) if has_numeric_id => task,
            _ => {
                self.load().await?;
                return Ok(None);
            }
        };

        self.state.send_modify(|tasks| tasks.insert(0, task.clone()));
        Ok(Some(task))
    }

    /// Sends a partial update and merges the confirmed fields over the cached
    /// record with the same id. Returns the merged record, or `None` when the
    /// id is not cached.
    pub async fn update(&self, id: i64, request: &UpdateTaskRequest) -> Result<Option<Task>, GatewayError> {
        let response: Value = self.gateway.put(&task_path(id), request).await?;
        let patch = match unwrap_data(response) {
            Value::Object(patch) => patch,
            _ => Map::new(),
        };

        let mut merged = None;
        self.state.send_if_modified(|tasks| {
            let Some(existing) = tasks.iter_mut().find(|task| task.id == id) else {
                return false;
            };
            match merge(existing, &patch) {
                Some(task) => {
                    *existing = task.clone();
                    merged = Some(task);
                    true
                }
                None => {
                    tracing::warn!(id, "confirmed task could not be merged into the cache");
                    merged = Some(existing.clone());
                    false
                }
            }
        });
        Ok(merged)
    }

    pub async fn toggle(&self, id: i64, completed: bool) -> Result<Option<Task>, GatewayError> {
        let request = UpdateTaskRequest {
            completed: Some(completed),
            ..Default::default()
        };
        self.update(id, &request).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), GatewayError> {
        let _: Value = self.gateway.delete(&task_path(id)).await?;
        self.state.send_if_modified(|tasks| {
            let before = tasks.len();
            tasks.retain(|task| task.id != id);
            tasks.len() != before
        });
        Ok(())
    }
}

/// The envelope's `data` when present, otherwise the response itself.
fn unwrap_data(response: Value) -> Value {
    match response {
        Value::Object(mut envelope) if envelope.contains_key("data") => envelope.remove("data").unwrap_or(Value::Null),
        other => other,
    }
}

/// Shallow merge of `patch` over `task`.
fn merge(task: &Task, patch: &Map<String, Value>) -> Option<Task> {
    let Ok(Value::Object(mut record)) = serde_json::to_value(task) else {
        return None;
    };
    for (key, value) in patch {
        record.insert(key.clone(), value.clone());
    }
    serde_json::from_value(Value::Object(record)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn task(id: i64, title: &str) -> Task {
        let now = Utc::now();
        Task {
            id,
            title: title.to_string(),
            description: None,
            completed: false,
            priority: 1,
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_unwrap_data() {
        assert_eq!(unwrap_data(json!({"success": true, "data": {"id": 1}})), json!({"id": 1}));
        assert_eq!(unwrap_data(json!({"id": 1})), json!({"id": 1}));
    }

    #[test]
    fn test_merge_overrides_only_supplied_fields() {
        let original = task(3, "Estudar");
        let patch = json!({"completed": true, "priority": 4});
        let merged = merge(&original, patch.as_object().unwrap()).unwrap();

        assert_eq!(merged.title, "Estudar");
        assert!(merged.completed);
        assert_eq!(merged.priority, 4);
        assert_eq!(merged.id, 3);
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache = TaskCache::new(Gateway::new("http://localhost:1"));
        assert!(cache.tasks().is_empty());
        assert!(cache.subscribe().borrow().is_empty());
    }
}
