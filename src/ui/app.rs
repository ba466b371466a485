//! Top-level client controller.
//!
//! [`App`] wires the form and list events to the [`TaskCache`] and keeps the
//! last status message until it is taken for display. Errors are logged and
//! turned into a status message; they never propagate out of the handlers.

use super::form::{FormError, TaskForm};
use super::item::ToggleEvent;
use super::list::TaskList;
use crate::libs::cache::TaskCache;
use crate::libs::messages::Message;
use crate::libs::task::{CreateTaskRequest, Task};
use tokio::sync::watch;

pub struct App {
    cache: TaskCache,
    tasks: watch::Receiver<Vec<Task>>,
    form: TaskForm,
    loading: bool,
    status: Option<String>,
}

impl App {
    pub fn new(cache: TaskCache) -> Self {
        let tasks = cache.subscribe();
        App {
            cache,
            tasks,
            form: TaskForm::new(),
            loading: false,
            status: None,
        }
    }

    /// Latest snapshot published by the cache.
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn list(&self) -> TaskList {
        TaskList::new(self.tasks(), self.loading)
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Returns the status message and clears it.
    pub fn take_status(&mut self) -> Option<String> {
        self.status.take()
    }

    /// Returns `true` when the tasks were loaded.
    pub async fn load_tasks(&mut self) -> bool {
        self.loading = true;
        let result = self.cache.load().await;
        self.loading = false;

        match result {
            Ok(tasks) => {
                self.announce(Message::TasksLoaded(tasks.len()));
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "{}", Message::TasksLoadFailed);
                self.announce(Message::TasksLoadFailed);
                false
            }
        }
    }

    /// Feeds a raw title through the form and creates the task it emits.
    /// `Ok(false)` means the form ignored the title.
    pub async fn submit_title(&mut self, raw_title: &str) -> Result<bool, FormError> {
        self.form.set_title(raw_title);
        match self.form.submit()? {
            Some(request) => Ok(self.on_add_task(request).await),
            None => Ok(false),
        }
    }

    pub async fn on_add_task(&mut self, request: CreateTaskRequest) -> bool {
        match self.cache.create(&request).await {
            Ok(_) => {
                self.announce(Message::TaskAddedWithTitle(request.title));
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "{}", Message::TaskAddFailed);
                self.announce(Message::TaskAddFailed);
                false
            }
        }
    }

    pub async fn on_toggle_status(&mut self, event: ToggleEvent) -> bool {
        match self.cache.toggle(event.id, event.completed).await {
            Ok(_) => {
                self.announce(if event.completed {
                    Message::TaskMarkedCompleted
                } else {
                    Message::TaskMarkedPending
                });
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "{}", Message::TaskUpdateFailed);
                self.announce(Message::TaskUpdateFailed);
                false
            }
        }
    }

    /// Flips the task through the list component, as a click on its checkbox would.
    pub async fn toggle_task(&mut self, id: i64) -> bool {
        match self.list().toggle(id) {
            Some(event) => self.on_toggle_status(event).await,
            None => {
                self.announce(Message::TaskNotInList(id));
                false
            }
        }
    }

    pub async fn on_remove_task(&mut self, id: i64) -> bool {
        match self.cache.delete(id).await {
            Ok(()) => {
                self.announce(Message::TaskRemoved);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "{}", Message::TaskRemoveFailed);
                self.announce(Message::TaskRemoveFailed);
                false
            }
        }
    }

    fn announce(&mut self, message: Message) {
        self.status = Some(message.to_string());
    }
}
