//! Transport-safety layer: base64url encoding and the `Set-Cookie` size ceiling.
//!
//! Every higher layer funnels its stored bytes through [`write_bytes`], so the
//! size check runs exactly once, after all transforms, against the fully
//! serialized header.

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use cookie::Cookie;
use http::header::{HeaderMap, HeaderValue, COOKIE, SET_COOKIE};
use tracing::warn;

use crate::error::CookieError;

/// Upper bound on the length of a serialized `Set-Cookie` value, in bytes.
pub const MAX_COOKIE_LEN: usize = 4096;

/// Encode arbitrary bytes into a cookie-safe ASCII string.
pub fn encode(value: &[u8]) -> String {
    URL_SAFE.encode(value)
}

/// Decode a string produced by [`encode`].
///
/// # Errors
///
/// Returns [`CookieError::InvalidValue`] if `encoded` is not canonical
/// padded base64url.
pub fn decode(encoded: &str) -> Result<Vec<u8>, CookieError> {
    URL_SAFE
        .decode(encoded)
        .map_err(|_| CookieError::InvalidValue)
}

/// Encode the cookie's value and append it to `headers` as a `Set-Cookie`.
///
/// Attributes on `cookie` are emitted unchanged.
///
/// # Errors
///
/// - [`CookieError::InvalidName`] if the cookie name is not an RFC 6265 token.
/// - [`CookieError::ValueTooLong`] if the serialized cookie exceeds
///   [`MAX_COOKIE_LEN`]. Nothing is appended in that case.
pub fn write(headers: &mut HeaderMap, cookie: Cookie<'_>) -> Result<(), CookieError> {
    let value = cookie.value().as_bytes().to_vec();
    write_bytes(headers, cookie, &value)
}

/// Look up `name` in the request's `Cookie` headers and decode its value.
///
/// Returns `Ok(None)` when no cookie with that name was sent.
///
/// # Errors
///
/// Returns [`CookieError::InvalidValue`] if the cookie is present but not
/// validly encoded.
pub fn read(headers: &HeaderMap, name: &str) -> Result<Option<Vec<u8>>, CookieError> {
    match find(headers, name) {
        Some(raw) => decode(&raw).map(Some),
        None => Ok(None),
    }
}

/// Like [`write`], but stores `payload` instead of the cookie's string value.
///
/// Use this for values that are not UTF-8. Whatever value `cookie` carries is
/// replaced; its name and attributes are kept.
///
/// # Errors
///
/// Same as [`write`].
pub fn write_bytes(
    headers: &mut HeaderMap,
    mut cookie: Cookie<'_>,
    payload: &[u8],
) -> Result<(), CookieError> {
    if !is_token(cookie.name()) {
        return Err(CookieError::InvalidName);
    }
    cookie.set_value(encode(payload));

    let serialized = cookie.to_string();
    if serialized.len() > MAX_COOKIE_LEN {
        warn!(
            cookie = cookie.name(),
            len = serialized.len(),
            limit = MAX_COOKIE_LEN,
            "cookie exceeds size limit"
        );
        return Err(CookieError::ValueTooLong);
    }

    let header = HeaderValue::from_str(&serialized).map_err(|_| CookieError::InvalidHeader)?;
    headers.append(SET_COOKIE, header);
    Ok(())
}

/// First raw value sent for `name`, across all `Cookie` headers.
///
/// Headers may carry non-ASCII bytes from unrelated cookies; only the pairs
/// that fail to parse are skipped.
fn find(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| std::str::from_utf8(v.as_bytes()).ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|c| c.name() == name)
        .map(|c| c.value().to_owned())
}

/// RFC 6265 cookie-name: a non-empty token (visible ASCII minus separators).
pub(crate) fn is_token(name: &str) -> bool {
    const SEPARATORS: &[u8] = b"()<>@,;:\\\"/[]?={} \t";
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_graphic() && !SEPARATORS.contains(&b))
}
