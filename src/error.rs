//! Error types for formasi-export
//!
//! This module provides error handling for the library, including:
//! - The failure taxonomy of the upstream page fetch (transport, decode, upstream rejection)
//! - Validation and configuration errors raised before any fetch happens
//! - HTTP status code mapping for the web surface
//! - Structured JSON error bodies with machine-readable error codes

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for formasi-export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for formasi-export
///
/// The first four variants are the failure kinds a page fetch can surface. They
/// travel unmodified through the aggregator so the caller sees the root cause.
#[derive(Debug, Error)]
pub enum Error {
    /// Network-level failure talking to the upstream API (connect, timeout, body read)
    #[error("transport error: {message}")]
    Transport {
        /// Human-readable description of the failure
        message: String,
    },

    /// The upstream response body could not be decoded into the expected envelope
    #[error("failed to decode upstream response: {message}")]
    Decode {
        /// Decoder error message
        message: String,
        /// Raw response body, kept for diagnostics
        body: String,
    },

    /// The upstream API answered with its error flag set
    #[error("upstream rejected request: {message}")]
    UpstreamRejected {
        /// Message reported by the upstream API
        message: String,
    },

    /// Required input missing or malformed
    #[error("validation error: {0}")]
    Validation(String),

    /// Aggregated export does not add up to the total the upstream reported
    #[error("incomplete export: expected {expected} records, got {actual}")]
    IncompleteExport {
        /// Total reported by the upstream API
        expected: usize,
        /// Number of records actually reassembled
        actual: usize,
    },

    /// A batch task ended without reporting a result
    #[error("batch task failed: {0}")]
    TaskFailed(String),

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "page_size")
        key: Option<String>,
    },

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        let message = if e.is_timeout() {
            format!("request timed out: {}", e)
        } else if e.is_connect() {
            format!("connection failed: {}", e)
        } else {
            e.to_string()
        };
        Error::Transport { message }
    }
}

impl Error {
    /// Whether this error originated from talking to the upstream API
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::Transport { .. }
                | Error::Decode { .. }
                | Error::UpstreamRejected { .. }
                | Error::IncompleteExport { .. }
                | Error::TaskFailed(_)
        )
    }
}

/// API error response format
///
/// Returned by the JSON endpoints when an error occurs.
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "upstream_rejected",
///     "message": "upstream rejected request: rate limited"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "transport_error", "validation_error")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create an API error with additional details
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - missing or malformed input
            Error::Validation(_) => 400,

            // 500 Internal Server Error - every upstream failure is reported the same way
            Error::Transport { .. } => 500,
            Error::Decode { .. } => 500,
            Error::UpstreamRejected { .. } => 500,
            Error::IncompleteExport { .. } => 500,
            Error::TaskFailed(_) => 500,

            Error::Config { .. } => 500,
            Error::Csv(_) => 500,
            Error::Io(_) => 500,
            Error::ApiServerError(_) => 500,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Transport { .. } => "transport_error",
            Error::Decode { .. } => "decode_error",
            Error::UpstreamRejected { .. } => "upstream_rejected",
            Error::Validation(_) => "validation_error",
            Error::IncompleteExport { .. } => "incomplete_export",
            Error::TaskFailed(_) => "task_failed",
            Error::Config { .. } => "config_error",
            Error::Csv(_) => "csv_error",
            Error::Io(_) => "io_error",
            Error::ApiServerError(_) => "api_server_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        let details = match &error {
            Error::UpstreamRejected { message } => Some(serde_json::json!({
                "upstream_message": message,
            })),
            Error::IncompleteExport { expected, actual } => Some(serde_json::json!({
                "expected": expected,
                "actual": actual,
            })),
            Error::Config { key: Some(key), .. } => Some(serde_json::json!({
                "key": key,
            })),
            _ => None,
        };

        match details {
            Some(details) => ApiError::with_details(code, message, details),
            None => ApiError::new(code, message),
        }
    }
}
