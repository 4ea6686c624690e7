//! Common DTOs used across the API

use serde::Serialize;

/// Standard API response envelope
///
/// Every endpoint answers with this shape: `status_code` and `message`
/// always, `data` when the operation returns a payload, `detail` when an
/// internal error carries its raw cause (the error path builds the same
/// shape from `AppError`).
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// HTTP status code mirrored into the body
    pub status_code: u16,
    /// Human-readable outcome message
    pub message: String,
    /// Response payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Raw error detail (internal errors only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ApiResponse<()> {
    /// Create a success response with a message and no payload
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            message: message.into(),
            data: None,
            detail: None,
        }
    }
}

impl<T> ApiResponse<T> {
    /// Create a success response with a message and payload
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            status_code: 200,
            message: message.into(),
            data: Some(data),
            detail: None,
        }
    }
}
