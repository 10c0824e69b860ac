use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Failure talking to the backend API.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// The request never produced a response (connection refused, DNS,
    /// timeout) or the body could not be read.
    #[error("Failed to reach backend: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// The backend answered 2xx with a body that does not match the
    /// expected envelope.
    #[error("Unexpected backend response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl WebError {
    /// Text shown to the user in the page notice.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unreachable(_) => "Failed to reach backend".to_string(),
            Self::Api { message, .. } => message.clone(),
            Self::Decode(_) => "Unexpected response from backend".to_string(),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            Self::Api { status, message } => (status, axum::Json(json!({ "error": message }))),
            Self::Unreachable(ref err) => {
                tracing::error!(error = %err, "Backend unreachable");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(json!({ "error": "Failed to reach backend" })),
                )
            }
            Self::Decode(ref err) => {
                tracing::error!(error = %err, "Undecodable backend response");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(json!({ "error": "Unexpected response from backend" })),
                )
            }
        }
        .into_response()
    }
}
