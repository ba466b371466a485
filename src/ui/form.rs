use crate::libs::messages::Message;
use crate::libs::task::CreateTaskRequest;
use thiserror::Error;

pub const TITLE_MAX_LENGTH: usize = 200;
pub const TITLE_MIN_LENGTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{}", Message::FormTitleRequired)]
    TitleRequired,
    #[error("{}", Message::FormTitleTooLong(TITLE_MAX_LENGTH))]
    TitleTooLong,
}

/// Task creation form.
///
/// The raw input must be non-empty and at most 200 characters. A valid input
/// whose trimmed title is shorter than 3 characters is ignored without an
/// error; otherwise the form emits a request and clears itself.
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    title: String,
    touched: bool,
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Set after a rejected submission, cleared by a reset.
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.title.is_empty() {
            return Err(FormError::TitleRequired);
        }
        if self.title.chars().count() > TITLE_MAX_LENGTH {
            return Err(FormError::TitleTooLong);
        }
        Ok(())
    }

    pub fn submit(&mut self) -> Result<Option<CreateTaskRequest>, FormError> {
        if let Err(e) = self.validate() {
            self.touched = true;
            return Err(e);
        }

        let title = self.title.trim();
        if title.chars().count() < TITLE_MIN_LENGTH {
            return Ok(None);
        }

        let request = CreateTaskRequest { title: title.to_string() };
        self.reset();
        Ok(Some(request))
    }

    pub fn reset(&mut self) {
        self.title.clear();
        self.touched = false;
    }
}
