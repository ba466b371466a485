use crate::libs::envelope::ApiResponse;
use crate::libs::error::TaskError;
use crate::libs::messages::Message;
use crate::libs::validation::ValidationErrors;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// An error envelope paired with its status code.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ApiResponse<()>,
}

impl ApiError {
    pub fn not_found() -> Self {
        ApiError {
            status: StatusCode::NOT_FOUND,
            body: ApiResponse::failure(Message::TaskNotFound),
        }
    }

    pub fn validation(errors: ValidationErrors) -> Self {
        ApiError {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: ApiResponse::failure(Message::InvalidData).with_errors(errors),
        }
    }

    /// 500 with the operation's message; the underlying error text is only
    /// exposed when `debug` is on.
    pub fn internal(failure: Message, detail: impl ToString, debug: bool) -> Self {
        let body = ApiResponse::failure(failure);
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: if debug { body.with_error_detail(detail) } else { body },
        }
    }

    /// Maps a service failure to its status code. `failure` names the
    /// operation for the 500 message.
    pub fn from_task_error(error: TaskError, failure: Message, debug: bool) -> Self {
        match error {
            TaskError::Validation(errors) => Self::validation(errors),
            TaskError::NotFound(_) => Self::not_found(),
            TaskError::Database(e) => {
                tracing::error!(error = %e, "{}", failure);
                Self::internal(failure, e, debug)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
