//! Outbound HTTP for the task client.
//!
//! [`Gateway`] prefixes relative paths with the configured base URL, sets a
//! JSON content type on requests that carry a body, and turns every failure
//! into one of the two [`GatewayError`] shapes. Reads are retried once before
//! the error is reported.

use crate::libs::config::ClientConfig;
use crate::libs::messages::Message;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

const JSON_CONTENT_TYPE: &str = "application/json";
const READ_ATTEMPTS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// No HTTP response was received.
    #[error("Erro: {0}")]
    Transport(String),
    /// A response arrived with an error status, or its body could not be decoded.
    #[error("Código: {status}, Mensagem: {status_text}")]
    Status { status: u16, status_text: String },
}

impl GatewayError {
    fn from_status(status: StatusCode) -> Self {
        GatewayError::Status {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Gateway {
    client: Client,
    base_url: String,
}

impl Gateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Gateway {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Paths starting with `/` get the base URL; anything else is used as is.
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            path.to_string()
        }
    }

    /// Adds `Content-Type: application/json` when there is a body and the
    /// caller did not choose a content type.
    pub fn prepare_headers(mut headers: HeaderMap, has_body: bool) -> HeaderMap {
        if has_body && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        }
        headers
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let mut last_error = GatewayError::Transport(String::new());
        for attempt in 1..=READ_ATTEMPTS {
            match self.execute(Method::GET, path, HeaderMap::new(), None).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::debug!(attempt, url = %self.resolve_url(path), error = %e, "read attempt failed");
                    last_error = e;
                }
            }
        }
        Err(report(last_error))
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, GatewayError> {
        self.send_json(Method::POST, path, body).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, GatewayError> {
        self.send_json(Method::PUT, path, body).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        self.send(Method::DELETE, path, HeaderMap::new(), None).await
    }

    /// One request with caller-supplied headers and raw body, no retry.
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: Option<Vec<u8>>,
    ) -> Result<T, GatewayError> {
        self.execute(method, path, headers, body).await.map_err(report)
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let body = serde_json::to_vec(body).map_err(|e| report(GatewayError::Transport(e.to_string())))?;
        self.send(method, path, HeaderMap::new(), Some(body)).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: Option<Vec<u8>>,
    ) -> Result<T, GatewayError> {
        let url = self.resolve_url(path);
        let headers = Self::prepare_headers(headers, body.is_some());

        let mut request = self.client.request(method, &url).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| GatewayError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::from_status(status));
        }

        let bytes = response.bytes().await.map_err(|e| GatewayError::Transport(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::Status {
            status: status.as_u16(),
            status_text: e.to_string(),
        })
    }
}

/// Logs a normalized error once and hands it back.
fn report(error: GatewayError) -> GatewayError {
    tracing::error!("{}", Message::ApiErrorLogged(error.to_string()));
    error
}
