//! Task domain types shared by the server, the client gateway and the UI.
//!
//! ## Types
//!
//! - [`Task`]: a persisted task as it travels over the wire
//! - [`NewTask`] / [`TaskChanges`]: validated input for create and partial update
//! - [`CreateTaskRequest`] / [`UpdateTaskRequest`]: client-side request bodies
//! - [`TaskQuery`]: list filters, sorting and pagination
//! - [`Page`] / [`Pagination`]: a page of results and its metadata
//! - [`TaskStats`]: aggregate counters

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PRIORITY: i32 = 1;
pub const MIN_PRIORITY: i32 = 1;
pub const MAX_PRIORITY: i32 = 5;
pub const TITLE_MAX_LENGTH: usize = 255;
pub const DESCRIPTION_MAX_LENGTH: usize = 1000;
pub const DEFAULT_PER_PAGE: u32 = 15;
pub const MAX_PER_PAGE: u32 = 100;

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Not completed, has a due date, and that date has passed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due_date) if !self.completed => due_date < now,
            _ => false,
        }
    }

    pub fn status_text(&self) -> &'static str {
        if self.completed {
            "Concluída"
        } else {
            "Pendente"
        }
    }

    pub fn priority_text(&self) -> &'static str {
        match self.priority {
            1 => "Baixa",
            2 => "Média-Baixa",
            3 => "Média",
            4 => "Média-Alta",
            5 => "Alta",
            _ => "Não definida",
        }
    }
}

/// Validated input for a new task. Defaults are already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: i32,
    pub due_date: Option<DateTime<Utc>>,
}

impl NewTask {
    pub fn new(title: &str) -> Self {
        NewTask {
            title: title.to_string(),
            description: None,
            completed: false,
            priority: DEFAULT_PRIORITY,
            due_date: None,
        }
    }
}

/// Validated partial update. `None` leaves a field untouched; for the nullable
/// columns `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    pub priority: Option<i32>,
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl TaskChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Id,
    Title,
    Completed,
    Priority,
    DueDate,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "title",
            SortField::Completed => "completed",
            SortField::Priority => "priority",
            SortField::DueDate => "due_date",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "id" => Ok(SortField::Id),
            "title" => Ok(SortField::Title),
            "completed" => Ok(SortField::Completed),
            "priority" => Ok(SortField::Priority),
            "due_date" => Ok(SortField::DueDate),
            "created_at" => Ok(SortField::CreatedAt),
            "updated_at" => Ok(SortField::UpdatedAt),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// Filters, ordering and pagination for the task list.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskQuery {
    pub completed: Option<bool>,
    pub priority: Option<i32>,
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
    pub order_by: SortField,
    pub direction: SortDirection,
    pub per_page: u32,
    pub page: u32,
}

impl Default for TaskQuery {
    fn default() -> Self {
        TaskQuery {
            completed: None,
            priority: None,
            search: None,
            order_by: SortField::default(),
            direction: SortDirection::default(),
            per_page: DEFAULT_PER_PAGE,
            page: 1,
        }
    }
}

impl TaskQuery {
    pub fn limit(&self) -> u32 {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }

    pub fn offset(&self) -> u64 {
        (self.page.max(1) as u64 - 1) * self.limit() as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl Pagination {
    pub fn new(current_page: u32, per_page: u32, total: u64) -> Self {
        let per_page = per_page.max(1);
        let last_page = total.div_ceil(per_page as u64).max(1) as u32;
        Pagination {
            current_page: current_page.max(1),
            last_page,
            per_page,
            total,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

/// Aggregate counters. Wire names follow the public API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: u64,
    #[serde(rename = "concluidas")]
    pub completed: u64,
    #[serde(rename = "pendentes")]
    pub pending: u64,
    #[serde(rename = "atrasadas")]
    pub overdue: u64,
    #[serde(rename = "percentual_concluido")]
    pub percent_complete: f64,
}

impl TaskStats {
    pub fn new(total: u64, completed: u64, pending: u64, overdue: u64) -> Self {
        TaskStats {
            total,
            completed,
            pending,
            overdue,
            percent_complete: percent_complete(completed, total),
        }
    }
}

/// `round(completed / total * 100, 2)`, or 0 for an empty set.
pub fn percent_complete(completed: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = completed as f64 / total as f64 * 100.0;
    (percent * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn task(completed: bool, due_date: Option<DateTime<Utc>>) -> Task {
        let now = Utc::now();
        Task {
            id: 1,
            title: "Comprar leite".to_string(),
            description: None,
            completed,
            priority: 1,
            due_date,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_percent_complete_rounds_to_two_decimals() {
        assert_eq!(percent_complete(1, 3), 33.33);
        assert_eq!(percent_complete(2, 3), 66.67);
        assert_eq!(percent_complete(3, 3), 100.0);
        assert_eq!(percent_complete(0, 0), 0.0);
    }

    #[test]
    fn test_is_overdue() {
        let now = Utc::now();
        assert!(task(false, Some(now - Duration::hours(1))).is_overdue(now));
        assert!(!task(true, Some(now - Duration::hours(1))).is_overdue(now));
        assert!(!task(false, Some(now + Duration::hours(1))).is_overdue(now));
        assert!(!task(false, None).is_overdue(now));
    }

    #[test]
    fn test_pagination_last_page() {
        assert_eq!(Pagination::new(1, 15, 0).last_page, 1);
        assert_eq!(Pagination::new(1, 15, 15).last_page, 1);
        assert_eq!(Pagination::new(2, 15, 16).last_page, 2);
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!("priority".parse::<SortField>(), Ok(SortField::Priority));
        assert!("title; DROP TABLE tarefas".parse::<SortField>().is_err());
        assert_eq!("ASC".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert!("sideways".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_client_task_accepts_missing_optional_fields() {
        let task: Task = serde_json::from_str(
            r#"{"id": 7, "title": "x", "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(!task.completed);
        assert_eq!(task.priority, DEFAULT_PRIORITY);
        assert_eq!(task.description, None);
    }
}
