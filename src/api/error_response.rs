//! HTTP error response handling
//!
//! JSON endpoints turn [`Error`] into an [`ApiError`] body. The HTML and CSV
//! routes answer with a single plain-text message instead, wrapped through
//! [`PageError`].

use crate::error::{ApiError, Error, ToHttpStatus};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Prefix of every user-visible upstream failure on the HTML surface
pub const FETCH_FAILED_PREFIX: &str = "Failed to retrieve data: ";

fn status_of(error: &Error) -> StatusCode {
    StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Implement IntoResponse for Error to automatically convert errors to JSON responses
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = status_of(&self);
        let api_error: ApiError = self.into();

        (status_code, Json(api_error)).into_response()
    }
}

/// Error rendered as plain text for the browser-facing routes
#[derive(Debug)]
pub struct PageError(pub Error);

impl From<Error> for PageError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl PageError {
    /// The message shown to the user
    ///
    /// Only failures talking to the upstream carry [`FETCH_FAILED_PREFIX`].
    pub fn message(&self) -> String {
        match &self.0 {
            Error::Validation(message) => message.clone(),
            upstream if upstream.is_upstream() => format!("{}{}", FETCH_FAILED_PREFIX, upstream),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (status_of(&self.0), self.message()).into_response()
    }
}
