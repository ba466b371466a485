use super::item::{TaskItem, ToggleEvent};
use crate::libs::messages::Message;
use crate::libs::task::Task;
use chrono::Utc;
use prettytable::{row, Table};

/// Renders tasks as a terminal table and forwards item events unchanged.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    items: Vec<TaskItem>,
    loading: bool,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>, loading: bool) -> Self {
        TaskList {
            items: tasks.into_iter().map(TaskItem::new).collect(),
            loading,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn toggle(&mut self, id: i64) -> Option<ToggleEvent> {
        self.items.iter_mut().find(|item| item.task().id == id).map(TaskItem::toggle)
    }

    pub fn remove(&self, id: i64) -> Option<i64> {
        self.items.iter().find(|item| item.task().id == id).map(TaskItem::remove)
    }

    pub fn render(&self) -> String {
        if self.loading {
            return Message::LoadingTasks.to_string();
        }
        if self.items.is_empty() {
            return Message::NoTasks.to_string();
        }

        let now = Utc::now();
        let mut table = Table::new();
        table.add_row(row!["", "ID", "TÍTULO", "PRIORIDADE", "STATUS", "VENCIMENTO"]);
        for item in &self.items {
            let task = item.task();
            let due_date = match task.due_date {
                Some(due_date) if task.is_overdue(now) => format!("{} (!)", due_date.format("%d/%m/%Y %H:%M")),
                Some(due_date) => due_date.format("%d/%m/%Y %H:%M").to_string(),
                None => String::new(),
            };
            table.add_row(row![
                item.checkbox(),
                task.id,
                task.title,
                task.priority_text(),
                task.status_text(),
                due_date
            ]);
        }
        table.to_string()
    }

    pub fn print(&self) {
        println!("{}", self.render());
    }
}
