//! Error types and HTTP response conversion
//!
//! Every failure reaching a client is rendered as the same JSON envelope:
//!
//! ```json
//! { "success": false, "error": 422, "message": "unprocessable" }
//! ```
//!
//! Handlers choose between [`Error::NotFound`] (404) and
//! [`Error::Unprocessable`] (422). [`Error::BadRequest`] (400) and
//! [`Error::MethodNotAllowed`] (405) come from the HTTP layer only. A store
//! error no handler classified renders as 500 with the same envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::store::StoreError;

/// Result type alias using the service error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the service
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Store error not classified by a handler
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Requested resource or page does not exist (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request could not be carried out (422)
    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    /// Malformed request (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Known path, unsupported method (405)
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl Error {
    /// Convert any failure into a 422, logging its cause
    ///
    /// Used with `map_err` around store calls in mutating and
    /// lookup-dependent handlers.
    pub fn unprocessable(cause: impl fmt::Display) -> Self {
        let message = cause.to_string();
        tracing::warn!(cause = %message, "Request unprocessable");
        Error::Unprocessable(message)
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Error::NotFound(what.into())
    }

    /// HTTP status this error renders with
    pub fn status(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::Config(_) | Error::Io(_) | Error::Store(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,

    /// HTTP status code
    pub error: u16,

    /// Fixed message for the status
    pub message: String,
}

impl ErrorResponse {
    /// Create the envelope for a status
    pub fn new(status: StatusCode) -> Self {
        Self {
            success: false,
            error: status.as_u16(),
            message: message_for(status).to_string(),
        }
    }
}

fn message_for(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "bad request",
        StatusCode::NOT_FOUND => "resource not found",
        StatusCode::METHOD_NOT_ALLOWED => "method not allowed",
        StatusCode::UNPROCESSABLE_ENTITY => "unprocessable",
        _ => "internal server error",
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            Error::Store(e) => {
                tracing::error!(
                    operation = %e.operation,
                    kind = %e.kind,
                    retriable = e.is_retriable(),
                    "Store error: {}", e.message
                );
            }
            Error::Config(_) | Error::Io(_) | Error::Internal(_) => {
                tracing::error!("{}", self);
            }
            Error::NotFound(what) => tracing::debug!("Not found: {}", what),
            Error::BadRequest(reason) => tracing::debug!("Bad request: {}", reason),
            Error::Unprocessable(_) | Error::MethodNotAllowed => {}
        }

        (status, Json(ErrorResponse::new(status))).into_response()
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.error, self.message)
    }
}

// Manual From implementation for the boxed error
impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}
