//! Request handlers for the `/api` routes.
//!
//! - `GET /tarefas` - filtered, sorted, paginated list
//! - `GET /tarefas/{id}` - one task
//! - `POST /tarefas` - create (201)
//! - `PUT|PATCH /tarefas/{id}` - partial update
//! - `DELETE /tarefas/{id}` - delete
//! - `PATCH /tarefas/{id}/toggle` - flip `completed`
//! - `GET /estatisticas` - aggregate counters
//! - `GET /buscar/{term}` - search over title and description
//! - `GET /test` - health probe
//!
//! Any other path answers the 404 envelope.
//!
//! Path ids that are not integers answer 404, like unknown ids. Request
//! bodies that are empty or not a JSON object are read as `{}` so that the
//! validation rules produce the error map.

use super::error::ApiError;
use super::state::AppState;
use crate::libs::envelope::ApiResponse;
use crate::libs::messages::Message;
use crate::libs::task::{Task, TaskQuery, TaskStats};
use crate::libs::validation::{is_truthy, ValidationErrors};
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const API_VERSION: &str = "1.0.0";

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Raw list query string. Every value is kept as text and interpreted leniently.
#[derive(Debug, Default)]
pub struct ListParams {
    pub completed: Option<String>,
    pub priority: Option<String>,
    pub search: Option<String>,
    pub order_by: Option<String>,
    pub direction: Option<String>,
    pub per_page: Option<String>,
    pub page: Option<String>,
}

impl ListParams {
    /// Collects the known keys from decoded query pairs. Unknown keys are
    /// ignored and a repeated key keeps its last value.
    pub fn from_pairs<K: AsRef<str>, V: Into<String>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        let mut params = ListParams::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "completed" => &mut params.completed,
                "priority" => &mut params.priority,
                "search" => &mut params.search,
                "order_by" => &mut params.order_by,
                "direction" => &mut params.direction,
                "per_page" => &mut params.per_page,
                "page" => &mut params.page,
                _ => continue,
            };
            *slot = Some(value.into());
        }
        params
    }

    pub fn into_query(self) -> Result<TaskQuery, ValidationErrors> {
        let mut query = TaskQuery::default();
        let mut errors = ValidationErrors::new();

        query.completed = present(self.completed).map(|raw| is_truthy(&raw));
        // An unparseable priority still filters, and matches nothing.
        query.priority = present(self.priority).map(|raw| raw.parse().unwrap_or(0));
        query.search = present(self.search);

        if let Some(raw) = present(self.order_by) {
            match raw.parse() {
                Ok(field) => query.order_by = field,
                Err(field) => errors.add("order_by", Message::OrderByInvalid(field)),
            }
        }
        if let Some(raw) = present(self.direction) {
            match raw.parse() {
                Ok(direction) => query.direction = direction,
                Err(direction) => errors.add("direction", Message::DirectionInvalid(direction)),
            }
        }
        if let Some(per_page) = present(self.per_page).and_then(|raw| raw.parse().ok()) {
            query.per_page = per_page;
        }
        if let Some(page) = present(self.page).and_then(|raw| raw.parse::<u32>().ok()) {
            query.page = page.max(1);
        }

        errors.into_result(query)
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim().parse().map_err(|_| ApiError::not_found())
}

fn parse_body(body: &Bytes) -> Map<String, Value> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Vec<Task>> {
    let query = ListParams::from_pairs(pairs).into_query().map_err(ApiError::validation)?;
    let page = state
        .service
        .list(&query)
        .map_err(|e| ApiError::from_task_error(e, Message::TaskListFailed, state.debug))?;

    Ok(Json(ApiResponse::ok(page.items).with_pagination(page.pagination)))
}

pub async fn show_task(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Task> {
    let id = parse_id(&id)?;
    let task = state
        .service
        .get(id)
        .map_err(|e| ApiError::from_task_error(e, Message::TaskFetchFailed, state.debug))?;

    Ok(Json(ApiResponse::ok(task)))
}

pub async fn create_task(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<ApiResponse<Task>>), ApiError> {
    let task = state
        .service
        .create(&parse_body(&body))
        .map_err(|e| ApiError::from_task_error(e, Message::TaskCreateFailed, state.debug))?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(task).with_message(Message::TaskCreated))))
}

pub async fn update_task(State(state): State<AppState>, Path(id): Path<String>, body: Bytes) -> ApiResult<Task> {
    let id = parse_id(&id)?;
    let task = state
        .service
        .update(id, &parse_body(&body))
        .map_err(|e| ApiError::from_task_error(e, Message::TaskUpdateFailed, state.debug))?;

    Ok(Json(ApiResponse::ok(task).with_message(Message::TaskUpdated)))
}

pub async fn delete_task(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let id = parse_id(&id)?;
    state
        .service
        .delete(id)
        .map_err(|e| ApiError::from_task_error(e, Message::TaskDeleteFailed, state.debug))?;

    Ok(Json(ApiResponse::message(Message::TaskDeleted)))
}

pub async fn toggle_task(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Task> {
    let id = parse_id(&id)?;
    let task = state
        .service
        .toggle(id)
        .map_err(|e| ApiError::from_task_error(e, Message::TaskToggleFailed, state.debug))?;

    Ok(Json(ApiResponse::ok(task).with_message(Message::TaskStatusChanged)))
}

pub async fn statistics(State(state): State<AppState>) -> ApiResult<TaskStats> {
    let stats = state
        .service
        .stats()
        .map_err(|e| ApiError::from_task_error(e, Message::StatisticsFailed, state.debug))?;

    Ok(Json(ApiResponse::ok(stats)))
}

pub async fn search_tasks(State(state): State<AppState>, Path(term): Path<String>) -> ApiResult<Vec<Task>> {
    let tasks = state
        .service
        .search(&term)
        .map_err(|e| ApiError::from_task_error(e, Message::SearchFailed, state.debug))?;

    Ok(Json(ApiResponse::ok(tasks)))
}

/// Answers every unmatched path with the not-found envelope.
pub async fn fallback() -> ApiError {
    ApiError::not_found()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
    pub timestamp: String,
    pub version: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: Message::ApiHealthy.to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        version: API_VERSION.to_string(),
    })
}
