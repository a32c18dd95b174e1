//! Structured error taxonomy shared by every Agentic Commerce endpoint.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of error categories the protocol defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    InvalidRequest,
    RequestNotIdempotent,
    ProcessingError,
    ServiceUnavailable,
    RateLimitExceeded,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorType::InvalidRequest => "invalid_request",
            ErrorType::RequestNotIdempotent => "request_not_idempotent",
            ErrorType::ProcessingError => "processing_error",
            ErrorType::ServiceUnavailable => "service_unavailable",
            ErrorType::RateLimitExceeded => "rate_limit_exceeded",
        };
        write!(f, "{name}")
    }
}

/// Error body returned by merchant endpoints and by the webhook router.
///
/// `code` is provider-specific and open-ended (each endpoint narrows it to
/// its own set), so it stays a string; `type` is closed. `param` points at
/// the offending request field when the merchant knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{error_type} / {code}: {message}")]
pub struct ApiError {
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl ApiError {
    /// Build an `invalid_request` error with the given code and message.
    pub fn invalid_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_type: ErrorType::InvalidRequest,
            code: code.into(),
            message: message.into(),
            param: None,
        }
    }
}
