//! HTTP client for the taskboard backend API.
//!
//! Typed calls unwrap the `{success, data}` envelope. [`BackendClient::forward`]
//! passes a request through untouched for the `/api/*` proxy.

use axum::body::Bytes;
use axum::http::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use taskboard_core::category::{Category, CategoryInput};
use taskboard_core::task::{CreateTask, Task, UpdateTask};

use crate::error::WebError;

/// Success envelope returned by the backend.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Error envelope returned by the backend. Only the fields the frontend
/// shows are read.
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
    message: Option<String>,
}

/// A raw backend reply relayed by the proxy.
#[derive(Debug)]
pub struct Forwarded {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// HTTP client for a single backend instance.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    api_url: String,
}

impl BackendClient {
    /// * `api_url` - Base HTTP URL, e.g. `http://localhost:3001`.
    pub fn new(api_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }

    // ---- tasks ----

    pub async fn list_tasks(&self) -> Result<Vec<Task>, WebError> {
        self.send(Method::GET, "/api/tasks", None::<&()>).await
    }

    pub async fn create_task(&self, input: &CreateTask) -> Result<Task, WebError> {
        self.send(Method::POST, "/api/tasks", Some(input)).await
    }

    pub async fn update_task(&self, id: &str, input: &UpdateTask) -> Result<Task, WebError> {
        self.send(Method::PUT, &format!("/api/tasks/{id}"), Some(input))
            .await
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), WebError> {
        self.send_unit(Method::DELETE, &format!("/api/tasks/{id}"))
            .await
    }

    // ---- categories ----

    pub async fn list_categories(&self) -> Result<Vec<Category>, WebError> {
        self.send(Method::GET, "/api/categories", None::<&()>).await
    }

    pub async fn create_category(&self, input: &CategoryInput) -> Result<Category, WebError> {
        self.send(Method::POST, "/api/categories", Some(input)).await
    }

    pub async fn update_category(
        &self,
        id: &str,
        input: &CategoryInput,
    ) -> Result<Category, WebError> {
        self.send(Method::PUT, &format!("/api/categories/{id}"), Some(input))
            .await
    }

    pub async fn delete_category(&self, id: &str) -> Result<(), WebError> {
        self.send_unit(Method::DELETE, &format!("/api/categories/{id}"))
            .await
    }

    // ---- proxy ----

    /// Relay a request to the backend and return its status and body as-is.
    ///
    /// `path_and_query` must start with `/api/`. Only transport failures
    /// are errors; any HTTP status from the backend is a successful relay.
    pub async fn forward(
        &self,
        method: Method,
        path_and_query: &str,
        body: Bytes,
    ) -> Result<Forwarded, WebError> {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.api_url, path_and_query));
        if !body.is_empty() {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        Ok(Forwarded {
            status,
            content_type,
            body,
        })
    }

    // ---- private helpers ----

    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, WebError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.api_url, path));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = Self::ensure_success(request.send().await?).await?;
        let bytes = response.bytes().await?;
        let envelope: Envelope<T> = serde_json::from_slice(&bytes)?;
        Ok(envelope.data)
    }

    async fn send_unit(&self, method: Method, path: &str) -> Result<(), WebError> {
        let response = self
            .client
            .request(method, format!("{}{}", self.api_url, path))
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    /// Turn a non-2xx reply into [`WebError::Api`] carrying the backend's
    /// message.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, WebError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let bytes = response.bytes().await.unwrap_or_default();
        let envelope: ErrorEnvelope = serde_json::from_slice(&bytes).unwrap_or_default();
        let message = envelope
            .message
            .or(envelope.error)
            .unwrap_or_else(|| format!("Backend returned {status}"));

        Err(WebError::Api { status, message })
    }
}
