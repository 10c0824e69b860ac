//! Pass-through of `/api/*` requests to the backend.
//!
//! Method, query string and JSON body are forwarded; the backend's status
//! and body come back unchanged. Only a transport failure is answered
//! locally, with 500 `{"error": "Failed to reach backend"}`.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::error::WebError;
use crate::state::WebState;

/// Proxy routes, mounted at the root so request paths match the backend's.
///
/// ```text
/// GET, POST          /api/tasks
/// GET, PUT, DELETE   /api/tasks/{id}
/// GET, POST          /api/categories
/// GET, PUT, DELETE   /api/categories/{id}
/// ```
pub fn router() -> Router<WebState> {
    Router::new()
        .route("/api/tasks", get(forward).post(forward))
        .route("/api/tasks/{id}", get(forward).put(forward).delete(forward))
        .route("/api/categories", get(forward).post(forward))
        .route(
            "/api/categories/{id}",
            get(forward).put(forward).delete(forward),
        )
}

async fn forward(
    State(state): State<WebState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Response, WebError> {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    let reply = state
        .backend
        .forward(method.clone(), path, body)
        .await
        .inspect_err(|e| tracing::warn!(%method, path, error = %e, "Proxy request failed"))?;

    tracing::debug!(%method, path, status = %reply.status, "Proxied request");

    let content_type = reply
        .content_type
        .unwrap_or_else(|| "application/json".to_string());
    Ok((reply.status, [(header::CONTENT_TYPE, content_type)], reply.body).into_response())
}
