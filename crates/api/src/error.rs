use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use taskboard_core::error::{CoreError, FieldViolation};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `taskboard_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Body shape shared by every error response.
struct ErrorBody {
    status: StatusCode,
    label: &'static str,
    code: &'static str,
    message: String,
    details: Option<Vec<FieldViolation>>,
}

impl ErrorBody {
    fn new(status: StatusCode, label: &'static str, code: &'static str, message: String) -> Self {
        Self {
            status,
            label,
            code,
            message,
            details: None,
        }
    }

    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            "INTERNAL_ERROR",
            "An internal error occurred".to_string(),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(violations) => ErrorBody {
                    details: Some(violations.clone()),
                    ..ErrorBody::new(
                        StatusCode::BAD_REQUEST,
                        "Validation Error",
                        "VALIDATION_ERROR",
                        violations
                            .iter()
                            .map(|v| v.message.as_str())
                            .collect::<Vec<_>>()
                            .join("; "),
                    )
                },
                CoreError::NotFound { entity, id } => {
                    tracing::debug!(entity, id = %id, "Entity not found");
                    ErrorBody::new(
                        StatusCode::NOT_FOUND,
                        "Not Found",
                        "NOT_FOUND",
                        format!("{entity} not found"),
                    )
                }
                CoreError::Integrity(msg) => ErrorBody::new(
                    StatusCode::BAD_REQUEST,
                    "Bad Request",
                    "INTEGRITY_CONFLICT",
                    msg.clone(),
                ),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    ErrorBody::internal()
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => ErrorBody::new(
                StatusCode::BAD_REQUEST,
                "Bad Request",
                "BAD_REQUEST",
                msg.clone(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                ErrorBody::internal()
            }
        };

        let mut json = json!({
            "success": false,
            "error": body.label,
            "code": body.code,
            "message": body.message,
        });
        if let Some(details) = body.details {
            json["details"] = json!(details);
        }

        (body.status, axum::Json(json)).into_response()
    }
}

/// Classify a sqlx error into an error body.
///
/// - `RowNotFound` maps to 404.
/// - Foreign key violations (23503) map to 400: either a task points at a
///   category that no longer exists, or a category delete raced with a new
///   task referencing it.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> ErrorBody {
    match err {
        sqlx::Error::RowNotFound => ErrorBody::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23503") => {
            tracing::warn!(error = %db_err, "Foreign key violation");
            ErrorBody::new(
                StatusCode::BAD_REQUEST,
                "Bad Request",
                "INTEGRITY_CONFLICT",
                "The referenced record does not exist or is still in use".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            ErrorBody::internal()
        }
    }
}
