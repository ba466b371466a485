use crate::libs::error::TaskError;
use crate::libs::task::{NewTask, Page, Pagination, Task, TaskChanges, TaskQuery, TaskStats};
use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::types::ToSql;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const TASK_COLUMNS: &str = "id, title, description, completed, priority, due_date, created_at, updated_at";
const INSERT_TASK: &str = "INSERT INTO tarefas (title, description, completed, priority, due_date, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)";
const DELETE_TASK: &str = "DELETE FROM tarefas WHERE id = ?1";
const TOGGLE_TASK: &str = "UPDATE tarefas SET completed = NOT completed, updated_at = ?2 WHERE id = ?1";
const SELECT_STATS: &str = "SELECT
    COUNT(*),
    COALESCE(SUM(CASE WHEN completed THEN 1 ELSE 0 END), 0),
    COALESCE(SUM(CASE WHEN NOT completed AND due_date IS NOT NULL AND due_date < ?1 THEN 1 ELSE 0 END), 0)
    FROM tarefas";
const SEARCH_ORDER: &str = "ORDER BY priority DESC, created_at DESC, id DESC";

/// Task persistence over a borrowed connection or transaction.
pub struct Tasks<'a> {
    conn: &'a Connection,
}

impl<'a> Tasks<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Tasks { conn }
    }

    /// Filtered, sorted page of tasks plus the total row count for the filters.
    pub fn list(&self, query: &TaskQuery) -> Result<Page<Task>, TaskError> {
        let mut conditions: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(completed) = query.completed {
            conditions.push("completed = ?");
            values.push(Box::new(completed));
        }
        if let Some(priority) = query.priority {
            conditions.push("priority = ?");
            values.push(Box::new(priority));
        }
        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            conditions.push("title LIKE ? ESCAPE '\\'");
            values.push(Box::new(like_pattern(search)));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let total: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM tarefas {}", where_clause),
            params_from_iter(values.iter()),
            |row| row.get(0),
        )?;

        let limit = query.limit();
        let direction = query.direction.keyword();
        let sql = format!(
            "SELECT {} FROM tarefas {} ORDER BY {} {}, id {} LIMIT {} OFFSET {}",
            TASK_COLUMNS,
            where_clause,
            query.order_by.column(),
            direction,
            direction,
            limit,
            query.offset()
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let items = stmt
            .query_map(params_from_iter(values.iter()), map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page {
            items,
            pagination: Pagination::new(query.page, limit, total.max(0) as u64),
        })
    }

    pub fn get(&self, id: i64) -> Result<Option<Task>, TaskError> {
        let task = self
            .conn
            .query_row(&format!("SELECT {} FROM tarefas WHERE id = ?1", TASK_COLUMNS), params![id], map_row)
            .optional()?;
        Ok(task)
    }

    /// Like [`Tasks::get`], but a missing row is [`TaskError::NotFound`].
    pub fn find(&self, id: i64) -> Result<Task, TaskError> {
        self.get(id)?.ok_or(TaskError::NotFound(id))
    }

    pub fn insert(&self, task: &NewTask, now: DateTime<Utc>) -> Result<Task, TaskError> {
        self.conn.execute(
            INSERT_TASK,
            params![
                task.title,
                task.description,
                task.completed,
                task.priority,
                task.due_date.map(|d| d.trunc_subsecs(0)),
                now.trunc_subsecs(0)
            ],
        )?;
        self.find(self.conn.last_insert_rowid())
    }

    /// Applies only the supplied fields. An empty change set leaves the row,
    /// including `updated_at`, untouched.
    pub fn update(&self, id: i64, changes: &TaskChanges, now: DateTime<Utc>) -> Result<Task, TaskError> {
        let current = self.find(id)?;
        if changes.is_empty() {
            return Ok(current);
        }

        let mut assignments: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(title) = &changes.title {
            assignments.push("title = ?");
            values.push(Box::new(title.clone()));
        }
        if let Some(description) = &changes.description {
            assignments.push("description = ?");
            values.push(Box::new(description.clone()));
        }
        if let Some(completed) = changes.completed {
            assignments.push("completed = ?");
            values.push(Box::new(completed));
        }
        if let Some(priority) = changes.priority {
            assignments.push("priority = ?");
            values.push(Box::new(priority));
        }
        if let Some(due_date) = changes.due_date {
            assignments.push("due_date = ?");
            values.push(Box::new(due_date.map(|d| d.trunc_subsecs(0))));
        }
        assignments.push("updated_at = ?");
        values.push(Box::new(now.trunc_subsecs(0)));
        values.push(Box::new(id));

        let sql = format!("UPDATE tarefas SET {} WHERE id = ?", assignments.join(", "));
        self.conn.execute(&sql, params_from_iter(values.iter()))?;

        self.find(id)
    }

    pub fn delete(&self, id: i64) -> Result<(), TaskError> {
        match self.conn.execute(DELETE_TASK, params![id])? {
            0 => Err(TaskError::NotFound(id)),
            _ => Ok(()),
        }
    }

    pub fn toggle(&self, id: i64, now: DateTime<Utc>) -> Result<Task, TaskError> {
        match self.conn.execute(TOGGLE_TASK, params![id, now.trunc_subsecs(0)])? {
            0 => Err(TaskError::NotFound(id)),
            _ => self.find(id),
        }
    }

    pub fn stats(&self, now: DateTime<Utc>) -> Result<TaskStats, TaskError> {
        let (total, completed, overdue): (i64, i64, i64) = self
            .conn
            .query_row(SELECT_STATS, params![now.trunc_subsecs(0)], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?;

        let total = total.max(0) as u64;
        let completed = completed.max(0) as u64;
        Ok(TaskStats::new(total, completed, total - completed, overdue.max(0) as u64))
    }

    /// Case-insensitive substring search over title and description.
    pub fn search(&self, term: &str) -> Result<Vec<Task>, TaskError> {
        let sql = format!(
            "SELECT {} FROM tarefas WHERE title LIKE ?1 ESCAPE '\\' OR description LIKE ?1 ESCAPE '\\' {}",
            TASK_COLUMNS, SEARCH_ORDER
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let tasks = stmt
            .query_map(params![like_pattern(term)], map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }
}

fn map_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        completed: row.get(3)?,
        priority: row.get(4)?,
        due_date: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// `%term%` with the LIKE wildcards in `term` escaped.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::init_with_migrations;
    use crate::libs::task::{SortDirection, SortField};
    use chrono::Duration;

    fn setup() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        init_with_migrations(&mut conn).unwrap();
        conn
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_insert_applies_defaults() {
        let conn = setup();
        let tasks = Tasks::new(&conn);
        let task = tasks.insert(&NewTask::new("Buy milk"), Utc::now()).unwrap();

        assert_eq!(task.title, "Buy milk");
        assert!(!task.completed);
        assert_eq!(task.priority, 1);
        assert_eq!(task.created_at, task.updated_at);
        assert_eq!(task.created_at.timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let conn = setup();
        let tasks = Tasks::new(&conn);
        let first = tasks.insert(&NewTask::new("a"), Utc::now()).unwrap();
        tasks.delete(first.id).unwrap();
        let second = tasks.insert(&NewTask::new("b"), Utc::now()).unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn test_update_keeps_missing_fields() {
        let conn = setup();
        let tasks = Tasks::new(&conn);
        let now = Utc::now();
        let task = tasks.insert(&NewTask::new("Original"), now).unwrap();

        let changes = TaskChanges { completed: Some(true), ..Default::default() };
        let updated = tasks.update(task.id, &changes, now + Duration::seconds(5)).unwrap();

        assert_eq!(updated.title, "Original");
        assert!(updated.completed);
        assert!(updated.updated_at > task.updated_at);
    }

    #[test]
    fn test_missing_id_is_not_found() {
        let conn = setup();
        let tasks = Tasks::new(&conn);
        assert!(matches!(tasks.find(42), Err(TaskError::NotFound(42))));
        assert!(matches!(tasks.delete(42), Err(TaskError::NotFound(42))));
        assert!(matches!(tasks.toggle(42, Utc::now()), Err(TaskError::NotFound(42))));
        assert!(matches!(tasks.update(42, &TaskChanges::default(), Utc::now()), Err(TaskError::NotFound(42))));
    }

    #[test]
    fn test_list_sorting_and_paging() {
        let conn = setup();
        let tasks = Tasks::new(&conn);
        let now = Utc::now();
        for (i, title) in ["c", "a", "b"].iter().enumerate() {
            let mut task = NewTask::new(title);
            task.priority = i as i32 + 1;
            tasks.insert(&task, now).unwrap();
        }

        let query = TaskQuery {
            order_by: SortField::Title,
            direction: SortDirection::Asc,
            per_page: 2,
            ..Default::default()
        };
        let page = tasks.list(&query).unwrap();
        let titles: Vec<&str> = page.items.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.last_page, 2);

        let page = tasks.list(&TaskQuery { page: 2, ..query }).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "c");
    }

    #[test]
    fn test_list_default_order_breaks_ties_by_id() {
        let conn = setup();
        let tasks = Tasks::new(&conn);
        let now = Utc::now();
        let first = tasks.insert(&NewTask::new("first"), now).unwrap();
        let second = tasks.insert(&NewTask::new("second"), now).unwrap();

        let page = tasks.list(&TaskQuery::default()).unwrap();
        assert_eq!(page.items[0].id, second.id);
        assert_eq!(page.items[1].id, first.id);
    }

    #[test]
    fn test_list_search_is_case_insensitive() {
        let conn = setup();
        let tasks = Tasks::new(&conn);
        tasks.insert(&NewTask::new("Comprar LEITE"), Utc::now()).unwrap();
        tasks.insert(&NewTask::new("Estudar"), Utc::now()).unwrap();

        let query = TaskQuery { search: Some("leite".to_string()), ..Default::default() };
        let page = tasks.list(&query).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Comprar LEITE");
    }

    #[test]
    fn test_stats_counts_overdue() {
        let conn = setup();
        let tasks = Tasks::new(&conn);
        let now = Utc::now();

        let mut overdue = NewTask::new("late");
        overdue.due_date = Some(now - Duration::days(1));
        tasks.insert(&overdue, now).unwrap();

        let mut done = NewTask::new("done");
        done.completed = true;
        done.due_date = Some(now - Duration::days(1));
        tasks.insert(&done, now).unwrap();

        tasks.insert(&NewTask::new("open"), now).unwrap();

        let stats = tasks.stats(now).unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.percent_complete, 33.33);
    }

    #[test]
    fn test_search_matches_description_and_orders_by_priority() {
        let conn = setup();
        let tasks = Tasks::new(&conn);
        let now = Utc::now();

        let mut low = NewTask::new("Ler livro");
        low.description = Some("capítulo sobre Rust".to_string());
        tasks.insert(&low, now).unwrap();

        let mut high = NewTask::new("Projeto rust");
        high.priority = 5;
        tasks.insert(&high, now).unwrap();

        let found = tasks.search("RUST").unwrap();
        let titles: Vec<&str> = found.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Projeto rust", "Ler livro"]);
    }
}
