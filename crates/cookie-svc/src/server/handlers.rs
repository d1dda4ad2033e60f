//! Axum request handlers for all service endpoints.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{ErrorResponse, HealthResponse, Layer, ReadCookieResponse, WriteCookieRequest};
use common::ServiceError;
use cookie_codec::{Cookie, CookieError, ErrorKind, SameSite};
use tracing::{debug, warn};

use super::state::AppState;

/// `POST /cookies/:layer/:name`: write `value` as a cookie under `layer`.
///
/// Responds `204 No Content` with a single `Set-Cookie` header.
pub async fn write_cookie(
    State(state): State<AppState>,
    Path((layer, name)): Path<(Layer, String)>,
    Json(req): Json<WriteCookieRequest>,
) -> Response {
    let cookie = Cookie::build((name.clone(), req.value))
        .path(state.cookie_path.as_str().to_owned())
        .secure(state.cookie_secure)
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    let mut headers = HeaderMap::new();
    let result = match layer {
        Layer::Plain => cookie_codec::write(&mut headers, cookie),
        Layer::Signed => cookie_codec::write_signed(&mut headers, cookie, state.keys.signing()),
        Layer::Encrypted => {
            cookie_codec::write_encrypted(&mut headers, cookie, state.keys.encryption())
        }
    };

    match result {
        Ok(()) => {
            debug!(layer = ?layer, cookie = %name, "cookie written");
            (StatusCode::NO_CONTENT, headers).into_response()
        }
        Err(e) => error_response(service_error(e)),
    }
}

/// `GET /cookies/:layer/:name`: read and verify a cookie sent by the client.
///
/// Absent cookies yield `404`; every validation failure yields the same
/// opaque `400 invalid_cookie`.
pub async fn read_cookie(
    State(state): State<AppState>,
    Path((layer, name)): Path<(Layer, String)>,
    headers: HeaderMap,
) -> Response {
    let result = match layer {
        Layer::Plain => cookie_codec::read(&headers, &name),
        Layer::Signed => cookie_codec::read_signed(&headers, &name, state.keys.signing()),
        Layer::Encrypted => cookie_codec::read_encrypted(&headers, &name, state.keys.encryption()),
    };

    let value = match result {
        Ok(Some(v)) => v,
        Ok(None) => return error_response(ServiceError::NotFound(format!("cookie {name} was not sent"))),
        Err(e) => return error_response(service_error(e)),
    };

    match String::from_utf8(value) {
        Ok(value) => (StatusCode::OK, Json(ReadCookieResponse { name, value })).into_response(),
        Err(_) => error_response(ServiceError::InvalidCookie),
    }
}

/// `GET /health`: liveness check.
pub async fn health() -> Response {
    let body = HealthResponse {
        status: "ok".into(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

/// Map a codec failure onto the service error taxonomy.
fn service_error(err: CookieError) -> ServiceError {
    match err.kind() {
        ErrorKind::Validation => ServiceError::InvalidCookie,
        ErrorKind::Size => ServiceError::PayloadTooLarge(err.to_string()),
        ErrorKind::Configuration if err == CookieError::InvalidName => {
            ServiceError::BadRequest(err.to_string())
        }
        ErrorKind::Configuration => {
            warn!(error = %err, "cookie codec failure");
            ServiceError::Internal("cookie codec failure".into())
        }
    }
}

fn error_response(err: ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from(&err))).into_response()
}
