//! HMAC-SHA256 tags over `name || value`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::CookieError;

type HmacSha256 = Hmac<Sha256>;

/// Byte length of an HMAC-SHA256 tag.
pub const SIGNATURE_LEN: usize = 32;

/// Compute the tag binding `value` to the cookie `name` under `key`.
///
/// # Errors
///
/// HMAC accepts keys of any length, so this only fails if the underlying
/// implementation rejects the key outright.
pub fn signature(key: &[u8], name: &str, value: &[u8]) -> Result<[u8; SIGNATURE_LEN], CookieError> {
    let mut tag = [0u8; SIGNATURE_LEN];
    tag.copy_from_slice(&keyed(key, name, value)?.finalize().into_bytes());
    Ok(tag)
}

/// Check `tag` against the expected tag in constant time.
///
/// # Errors
///
/// Returns [`CookieError::InvalidValue`] on mismatch.
pub fn verify(key: &[u8], name: &str, value: &[u8], tag: &[u8]) -> Result<(), CookieError> {
    keyed(key, name, value)?
        .verify_slice(tag)
        .map_err(|_| CookieError::InvalidValue)
}

fn keyed(key: &[u8], name: &str, value: &[u8]) -> Result<HmacSha256, CookieError> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
        .map_err(|_| CookieError::InvalidKeyLength { len: key.len() })?;
    mac.update(name.as_bytes());
    mac.update(value);
    Ok(mac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc4231_case_2() {
        // Key "Jefe", data "what do ya want for nothing?" split across name/value.
        let tag = signature(b"Jefe", "what do ya want ", b"for nothing?").unwrap();
        let expected = [
            0x5b, 0xdc, 0xc1, 0x46, 0xbf, 0x60, 0x75, 0x4e, 0x6a, 0x04, 0x24, 0x26, 0x08, 0x95,
            0x75, 0xc7, 0x5a, 0x00, 0x3f, 0x08, 0x9d, 0x27, 0x39, 0x83, 0x9d, 0xec, 0x58, 0xb9,
            0x64, 0xec, 0x38, 0x43,
        ];
        assert_eq!(tag, expected);
    }

    #[test]
    fn deterministic() {
        let a = signature(b"k", "n", b"v").unwrap();
        let b = signature(b"k", "n", b"v").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn verify_rejects_truncated_tag() {
        let tag = signature(b"k", "n", b"v").unwrap();
        assert!(verify(b"k", "n", b"v", &tag).is_ok());
        assert_eq!(
            verify(b"k", "n", b"v", &tag[..SIGNATURE_LEN - 1]),
            Err(CookieError::InvalidValue)
        );
    }

    #[test]
    fn empty_key_is_accepted() {
        assert!(signature(b"", "n", b"v").is_ok());
    }
}
