use super::validation::ValidationErrors;
use thiserror::Error;

/// Failures raised by the task store and the query service.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("task {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

impl From<ValidationErrors> for TaskError {
    fn from(errors: ValidationErrors) -> Self {
        TaskError::Validation(errors)
    }
}
