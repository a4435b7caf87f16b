use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocol::SubmissionResult;

/// Message returned for every server-side failure whose detail stays in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal error";
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON payload";
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Request body too large";
pub const INVALID_EMAIL_MESSAGE: &str = "Please provide a valid email address.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Body was unreadable, oversized, or not JSON.
    InvalidPayload,
    /// Body was JSON but a field was missing, blank, or malformed.
    Validation,
    /// Email delivery is not configured on this server.
    Unavailable,
    /// The email provider answered with an error object.
    Provider,
    Internal,
}

impl ErrorCode {
    /// Whether the caller caused the failure (4xx) rather than the server (5xx).
    pub fn is_client_error(self) -> bool {
        matches!(self, ErrorCode::InvalidPayload | ErrorCode::Validation)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{code:?}: {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Opaque server-side failure; `code` is only for operators.
    pub fn opaque(code: ErrorCode) -> Self {
        Self::new(code, INTERNAL_ERROR_MESSAGE)
    }
}

impl From<ApiError> for SubmissionResult {
    fn from(value: ApiError) -> Self {
        SubmissionResult::failure(value.message)
    }
}
