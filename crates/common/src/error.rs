//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::InvalidCookie`] → 400
/// - [`ServiceError::NotFound`] → 404
/// - [`ServiceError::PayloadTooLarge`] → 413
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed: unknown layer, bad cookie name, or invalid JSON.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The cookie sent by the client failed decoding or authentication.
    ///
    /// Carries no detail so the response never reveals why.
    #[error("invalid cookie")]
    InvalidCookie,

    /// The requested cookie was not sent.
    #[error("not found: {0}")]
    NotFound(String),

    /// The encoded cookie would exceed the `Set-Cookie` size limit.
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::InvalidCookie => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::PayloadTooLarge(_) => 413,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable code used in error response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::InvalidCookie => "invalid_cookie",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::PayloadTooLarge(_) => "value_too_long",
            ServiceError::Internal(_) => "internal_error",
        }
    }
}
