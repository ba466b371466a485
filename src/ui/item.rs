use crate::libs::task::Task;

/// Emitted when an item's checkbox is flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleEvent {
    pub id: i64,
    pub completed: bool,
}

/// A single row of the task list. Holds its own copy of the task so the
/// checkbox can flip before the server answers.
#[derive(Debug, Clone)]
pub struct TaskItem {
    task: Task,
}

impl TaskItem {
    pub fn new(task: Task) -> Self {
        TaskItem { task }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn toggle(&mut self) -> ToggleEvent {
        self.task.completed = !self.task.completed;
        ToggleEvent {
            id: self.task.id,
            completed: self.task.completed,
        }
    }

    pub fn remove(&self) -> i64 {
        self.task.id
    }

    pub fn checkbox(&self) -> &'static str {
        if self.task.completed {
            "[x]"
        } else {
            "[ ]"
        }
    }
}
