//! Request and response types exchanged with the cookie service.
//!
//! These types are serialised as JSON over the public HTTP API.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Cookie endpoints
// ---------------------------------------------------------------------------

/// Protection layer selected by the `:layer` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Transport encoding only.
    Plain,
    /// HMAC-signed.
    Signed,
    /// AES-GCM encrypted.
    Encrypted,
}

/// Request body for `POST /cookies/:layer/:name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteCookieRequest {
    /// Value to store in the cookie.
    pub value: String,
}

/// Successful response body for `GET /cookies/:layer/:name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadCookieResponse {
    /// Cookie name that was read.
    pub name: String,
    /// Recovered, verified value.
    pub value: String,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"invalid_cookie"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&crate::ServiceError> for ErrorResponse {
    fn from(err: &crate::ServiceError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn layer_uses_lowercase_names() {
        let layer: Layer = serde_json::from_value(json!("encrypted")).unwrap();
        assert_eq!(layer, Layer::Encrypted);
        assert_eq!(serde_json::to_value(Layer::Plain).unwrap(), json!("plain"));
        assert!(serde_json::from_value::<Layer>(json!("Signed")).is_err());
    }

    #[test]
    fn write_request_from_json() {
        let req: WriteCookieRequest = serde_json::from_value(json!({"value": "abc123"})).unwrap();
        assert_eq!(req.value, "abc123");
    }

    #[test]
    fn error_response_from_service_error() {
        let e = ErrorResponse::from(&crate::ServiceError::InvalidCookie);
        assert_eq!(e.code, "invalid_cookie");
        assert_eq!(e.message, "invalid cookie");
    }

    #[test]
    fn read_response_serde() {
        let r = ReadCookieResponse {
            name: "session".into(),
            value: "abc123".into(),
        };
        let json = serde_json::to_string(&r).unwrap();
        let decoded: ReadCookieResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.value, "abc123");
    }
}
