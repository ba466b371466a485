use super::task::Pagination;
use super::validation::ValidationErrors;
use serde::{Deserialize, Serialize};

/// JSON envelope shared by every API response.
///
/// Only `success` is always present. The client decodes the same type; missing
/// fields decode as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
            pagination: None,
            error: None,
        }
    }

    pub fn with_message(mut self, message: impl ToString) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn failure(message: impl ToString) -> Self {
        ApiResponse {
            success: false,
            data: None,
            message: Some(message.to_string()),
            errors: None,
            pagination: None,
            error: None,
        }
    }

    pub fn with_errors(mut self, errors: ValidationErrors) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_error_detail(mut self, detail: impl ToString) -> Self {
        self.error = Some(detail.to_string());
        self
    }
}

impl ApiResponse<()> {
    /// Success with only a message, e.g. after a delete.
    pub fn message(message: impl ToString) -> Self {
        ApiResponse {
            success: true,
            data: None,
            message: Some(message.to_string()),
            errors: None,
            pagination: None,
            error: None,
        }
    }
}
