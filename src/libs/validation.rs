//! Field validation for task payloads.
//!
//! Input arrives as a loosely typed JSON object. Each rule appends a message to
//! the per-field error map instead of failing fast, so a single 422 response
//! reports every problem at once.
//!
//! Strings are trimmed before they are checked, and an empty string counts as
//! "not provided" for the nullable fields.

use super::messages::Message;
use super::task::{NewTask, TaskChanges, DESCRIPTION_MAX_LENGTH, DEFAULT_PRIORITY, MAX_PRIORITY, MIN_PRIORITY, TITLE_MAX_LENGTH};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: Message) {
        self.0.entry(field.to_string()).or_default().push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.0.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(value)` when no error was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "{}", fields.join(", "))
    }
}

/// Validates a create payload and applies defaults.
pub fn validate_new_task(input: &Map<String, Value>, now: DateTime<Utc>) -> Result<NewTask, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = match input.get("title") {
        None | Some(Value::Null) => {
            errors.add("title", Message::TitleRequired);
            None
        }
        Some(value) => check_title(value, &mut errors),
    };

    let description = input.get("description").and_then(|value| check_description(value, &mut errors));

    let completed = match input.get("completed") {
        None | Some(Value::Null) => false,
        Some(value) => check_completed(value, &mut errors).unwrap_or(false),
    };

    let priority = match input.get("priority") {
        None | Some(Value::Null) => DEFAULT_PRIORITY,
        Some(value) => check_priority(value, &mut errors).unwrap_or(DEFAULT_PRIORITY),
    };

    let due_date = match input.get("due_date").map(check_due_date) {
        Some(Err(())) => {
            errors.add("due_date", Message::DueDateInvalid);
            None
        }
        Some(Ok(Some(due_date))) if due_date <= now => {
            errors.add("due_date", Message::DueDateNotFuture);
            None
        }
        Some(Ok(due_date)) => due_date,
        None => None,
    };

    errors.into_result(NewTask {
        title: title.unwrap_or_default(),
        description,
        completed,
        priority,
        due_date,
    })
}

/// Validates a partial update. Only keys present in `input` become changes.
pub fn validate_task_changes(input: &Map<String, Value>) -> Result<TaskChanges, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let mut changes = TaskChanges::default();

    if let Some(value) = input.get("title") {
        if value.is_null() {
            errors.add("title", Message::TitleRequired);
        } else {
            changes.title = check_title(value, &mut errors);
        }
    }

    if let Some(value) = input.get("description") {
        let description = check_description(value, &mut errors);
        if !errors.contains("description") {
            changes.description = Some(description);
        }
    }

    if let Some(value) = input.get("completed") {
        changes.completed = check_completed(value, &mut errors);
    }

    if let Some(value) = input.get("priority") {
        changes.priority = check_priority(value, &mut errors);
    }

    if let Some(value) = input.get("due_date") {
        match check_due_date(value) {
            Ok(due_date) => changes.due_date = Some(due_date),
            Err(()) => errors.add("due_date", Message::DueDateInvalid),
        }
    }

    errors.into_result(changes)
}

fn check_title(value: &Value, errors: &mut ValidationErrors) -> Option<String> {
    let Value::String(title) = value else {
        errors.add("title", Message::TitleMustBeString);
        return None;
    };
    let title = title.trim();
    if title.is_empty() {
        errors.add("title", Message::TitleRequired);
        return None;
    }
    if title.chars().count() > TITLE_MAX_LENGTH {
        errors.add("title", Message::TitleTooLong);
        return None;
    }
    Some(title.to_string())
}

fn check_description(value: &Value, errors: &mut ValidationErrors) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(description) => {
            let description = description.trim();
            if description.is_empty() {
                None
            } else if description.chars().count() > DESCRIPTION_MAX_LENGTH {
                errors.add("description", Message::DescriptionTooLong);
                None
            } else {
                Some(description.to_string())
            }
        }
        _ => {
            errors.add("description", Message::DescriptionMustBeString);
            None
        }
    }
}

fn check_completed(value: &Value, errors: &mut ValidationErrors) -> Option<bool> {
    let completed = as_boolean(value);
    if completed.is_none() {
        errors.add("completed", Message::CompletedMustBeBoolean);
    }
    completed
}

fn check_priority(value: &Value, errors: &mut ValidationErrors) -> Option<i32> {
    let Some(priority) = as_integer(value) else {
        errors.add("priority", Message::PriorityMustBeInteger);
        return None;
    };
    if priority < MIN_PRIORITY as i64 {
        errors.add("priority", Message::PriorityTooLow);
        return None;
    }
    if priority > MAX_PRIORITY as i64 {
        errors.add("priority", Message::PriorityTooHigh);
        return None;
    }
    Some(priority as i32)
}

/// `Ok(None)` for null or an empty string, `Err(())` for anything unparseable.
fn check_due_date(value: &Value) -> Result<Option<DateTime<Utc>>, ()> {
    match value {
        Value::Null => Ok(None),
        Value::String(raw) if raw.trim().is_empty() => Ok(None),
        Value::String(raw) => parse_date_time(raw).map(Some).ok_or(()),
        _ => Err(()),
    }
}

/// Strict booleans: `true/false`, `1/0`, `"1"/"0"`, `"true"/"false"`.
pub fn as_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => match number.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(raw) => match raw.trim() {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// JSON integers and integer strings.
pub fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    }
}

/// Lenient query-string boolean: `1`, `true`, `on`, `yes` are true, anything else false.
pub fn is_truthy(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "on" | "yes")
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` (UTC) and `YYYY-MM-DD` (midnight UTC).
pub fn parse_date_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
        return Some(date_time.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_new_task_applies_defaults() {
        let task = validate_new_task(&object(json!({"title": "  Buy milk  "})), Utc::now()).unwrap();
        assert_eq!(task.title, "Buy milk");
        assert!(!task.completed);
        assert_eq!(task.priority, 1);
        assert_eq!(task.description, None);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn test_new_task_requires_title() {
        let errors = validate_new_task(&Map::new(), Utc::now()).unwrap_err();
        assert!(errors.contains("title"));

        let errors = validate_new_task(&object(json!({"title": "   "})), Utc::now()).unwrap_err();
        assert_eq!(errors.get("title").unwrap()[0], Message::TitleRequired.to_string());
    }

    #[test]
    fn test_new_task_collects_every_field_error() {
        let input = object(json!({
            "title": "x".repeat(256),
            "description": "d".repeat(1001),
            "priority": 9,
            "due_date": "not a date",
        }));
        let errors = validate_new_task(&input, Utc::now()).unwrap_err();
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec!["description", "due_date", "priority", "title"]);
        assert_eq!(errors.get("priority").unwrap()[0], Message::PriorityTooHigh.to_string());
    }

    #[test]
    fn test_new_task_due_date_must_be_future() {
        let now = Utc::now();
        let past = (now - Duration::days(1)).to_rfc3339();
        let errors = validate_new_task(&object(json!({"title": "t", "due_date": past})), now).unwrap_err();
        assert_eq!(errors.get("due_date").unwrap()[0], Message::DueDateNotFuture.to_string());

        let future = (now + Duration::days(1)).format("%Y-%m-%d %H:%M:%S").to_string();
        let task = validate_new_task(&object(json!({"title": "t", "due_date": future})), now).unwrap();
        assert!(task.due_date.unwrap() > now);
    }

    #[test]
    fn test_priority_bounds() {
        let now = Utc::now();
        let errors = validate_new_task(&object(json!({"title": "t", "priority": 0})), now).unwrap_err();
        assert_eq!(errors.get("priority").unwrap()[0], Message::PriorityTooLow.to_string());

        let task = validate_new_task(&object(json!({"title": "t", "priority": "5"})), now).unwrap();
        assert_eq!(task.priority, 5);
    }

    #[test]
    fn test_changes_only_include_present_keys() {
        let changes = validate_task_changes(&object(json!({"completed": true}))).unwrap();
        assert_eq!(changes.completed, Some(true));
        assert_eq!(changes.title, None);
        assert_eq!(changes.description, None);
        assert_eq!(changes.due_date, None);
    }

    #[test]
    fn test_changes_allow_clearing_nullable_fields() {
        let changes = validate_task_changes(&object(json!({"description": null, "due_date": null}))).unwrap();
        assert_eq!(changes.description, Some(None));
        assert_eq!(changes.due_date, Some(None));
    }

    #[test]
    fn test_changes_accept_past_due_date() {
        let past = (Utc::now() - Duration::days(3)).to_rfc3339();
        let changes = validate_task_changes(&object(json!({"due_date": past}))).unwrap();
        assert!(changes.due_date.unwrap().is_some());
    }

    #[test]
    fn test_changes_reject_empty_title_and_bad_types() {
        let errors = validate_task_changes(&object(json!({"title": "", "completed": "maybe", "priority": null}))).unwrap_err();
        assert!(errors.contains("title"));
        assert!(errors.contains("completed"));
        assert!(errors.contains("priority"));
    }

    #[test]
    fn test_boolean_and_truthy_parsing() {
        assert_eq!(as_boolean(&json!(1)), Some(true));
        assert_eq!(as_boolean(&json!("0")), Some(false));
        assert_eq!(as_boolean(&json!("yes")), None);
        assert!(is_truthy("yes"));
        assert!(is_truthy("TRUE"));
        assert!(!is_truthy("false"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn test_parse_date_time_formats() {
        assert!(parse_date_time("2030-05-01T10:00:00Z").is_some());
        assert!(parse_date_time("2030-05-01T10:00:00-03:00").is_some());
        assert!(parse_date_time("2030-05-01 10:00:00").is_some());
        assert!(parse_date_time("2030-05-01").is_some());
        assert!(parse_date_time("01/05/2030").is_none());
    }
}
