//! Shared response envelope types for API handlers.
//!
//! Successful responses use `{ "success": true, "data": ... }`, with a
//! `count` on list endpoints and a `message` on writes.

use serde::Serialize;

/// Standard success envelope wrapping a serializable payload.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse::new(task).with_message("Task created successfully")))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            count: None,
            message: None,
        }
    }

    pub fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl<T: Serialize> DataResponse<Vec<T>> {
    /// List envelope carrying the number of returned rows.
    pub fn list(data: Vec<T>) -> Self {
        let count = data.len();
        Self {
            count: Some(count),
            ..Self::new(data)
        }
    }
}

/// Success envelope without a payload, used by deletes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}
