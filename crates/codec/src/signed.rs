//! Signed cookies: tamper-evident but readable by the client.
//!
//! Stored bytes are `HMAC-SHA256(key, name || value) || value`. The name is
//! covered by the tag but not stored, so a signature minted for one cookie
//! name does not verify under another.

use cookie::Cookie;
use http::HeaderMap;
use tracing::debug;

use crate::crypto::mac;
use crate::error::CookieError;
use crate::transport;

pub use crate::crypto::SIGNATURE_LEN;

/// Build the signed payload `tag || value` for cookie `name`.
pub fn sign(name: &str, value: &[u8], key: &[u8]) -> Result<Vec<u8>, CookieError> {
    let tag = mac::signature(key, name, value)?;
    let mut payload = Vec::with_capacity(SIGNATURE_LEN + value.len());
    payload.extend_from_slice(&tag);
    payload.extend_from_slice(value);
    Ok(payload)
}

/// Check a signed payload for cookie `name` and return the bare value.
///
/// # Errors
///
/// Returns [`CookieError::InvalidValue`] if the payload is shorter than a tag
/// or the tag does not match.
pub fn verify(name: &str, payload: &[u8], key: &[u8]) -> Result<Vec<u8>, CookieError> {
    if payload.len() < SIGNATURE_LEN {
        return Err(CookieError::InvalidValue);
    }
    let (tag, value) = payload.split_at(SIGNATURE_LEN);
    mac::verify(key, name, value, tag)?;
    Ok(value.to_vec())
}

/// Sign the cookie's value and emit it as a `Set-Cookie` header.
///
/// # Errors
///
/// Propagates [`transport::write`] failures, notably
/// [`CookieError::ValueTooLong`].
pub fn write_signed(headers: &mut HeaderMap, cookie: Cookie<'_>, key: &[u8]) -> Result<(), CookieError> {
    let value = cookie.value().as_bytes().to_vec();
    write_signed_bytes(headers, cookie, &value, key)
}

/// Sign an arbitrary byte `value` and emit it under the cookie's name and
/// attributes. The cookie's own value is ignored.
pub fn write_signed_bytes(
    headers: &mut HeaderMap,
    cookie: Cookie<'_>,
    value: &[u8],
    key: &[u8],
) -> Result<(), CookieError> {
    let payload = sign(cookie.name(), value, key)?;
    transport::write_bytes(headers, cookie, &payload)
}

/// Read and verify the signed cookie `name`.
///
/// Returns `Ok(None)` if the cookie was not sent.
///
/// # Errors
///
/// Returns [`CookieError::InvalidValue`] for any decoding or verification failure.
pub fn read_signed(headers: &HeaderMap, name: &str, key: &[u8]) -> Result<Option<Vec<u8>>, CookieError> {
    let Some(payload) = transport::read(headers, name)? else {
        return Ok(None);
    };
    verify(name, &payload, key)
        .map(Some)
        .inspect_err(|_| debug!(cookie = name, "signed cookie rejected"))
}
