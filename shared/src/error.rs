//! Error body returned by the back-office API
//!
//! The Transaction Service answers non-2xx requests with a small JSON
//! object. Older endpoints use `error` instead of `message`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured error payload of a non-2xx response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable message
    #[serde(alias = "error")]
    pub message: String,
    /// Optional application error code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    /// Optional additional details (field-level errors, context, etc.)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiErrorResponse {
    /// Parse an error body, returning `None` when it is not structured JSON
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

/// Default message for an HTTP status when the body carries none
pub fn status_message(status: u16) -> &'static str {
    match status {
        400 => "Invalid request",
        401 => "Authentication required",
        403 => "Permission denied",
        404 => "Resource not found",
        409 => "Resource already exists",
        422 => "Business rule violation",
        500..=599 => "Internal server error",
        _ => "Unexpected response",
    }
}
