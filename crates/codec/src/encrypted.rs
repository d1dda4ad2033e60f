//! Encrypted cookies: confidential and tamper-evident.
//!
//! Stored bytes are `nonce || AES-GCM(name ":" value) || tag`. The cookie
//! name travels inside the ciphertext and is compared against the requested
//! name after decryption, so a sealed value cannot be replayed under a
//! different cookie name.
//!
//! Cookie names are RFC 6265 tokens and can never contain `:`, which makes the
//! first `:` in the plaintext an unambiguous separator.

use cookie::Cookie;
use http::HeaderMap;
use tracing::debug;

use crate::crypto::CookieCipher;
use crate::error::CookieError;
use crate::transport;

pub use crate::crypto::{NONCE_LEN, TAG_LEN};

const SEPARATOR: u8 = b':';

/// Encrypt `value` for cookie `name`, binding the name into the plaintext.
///
/// # Errors
///
/// - [`CookieError::InvalidKeyLength`] unless `key` is 16, 24, or 32 bytes.
/// - [`CookieError::InvalidName`] if `name` is not a valid cookie name.
/// - [`CookieError::EntropyUnavailable`] if no nonce could be generated.
pub fn seal(name: &str, value: &[u8], key: &[u8]) -> Result<Vec<u8>, CookieError> {
    let cipher = CookieCipher::new(key)?;
    if !transport::is_token(name) {
        return Err(CookieError::InvalidName);
    }

    let mut plaintext = Vec::with_capacity(name.len() + 1 + value.len());
    plaintext.extend_from_slice(name.as_bytes());
    plaintext.push(SEPARATOR);
    plaintext.extend_from_slice(value);

    cipher.seal(&plaintext)
}

/// Decrypt a sealed payload and check that it was sealed for `name`.
///
/// # Errors
///
/// Returns [`CookieError::InvalidKeyLength`] for an unusable key; every other
/// failure (truncation, wrong key, tampering, missing separator, name
/// mismatch) is [`CookieError::InvalidValue`].
pub fn open(name: &str, payload: &[u8], key: &[u8]) -> Result<Vec<u8>, CookieError> {
    open_with(&CookieCipher::new(key)?, name, payload)
}

fn open_with(cipher: &CookieCipher, name: &str, payload: &[u8]) -> Result<Vec<u8>, CookieError> {
    let plaintext = cipher.open(payload)?;

    let split = plaintext
        .iter()
        .position(|&b| b == SEPARATOR)
        .ok_or(CookieError::InvalidValue)?;
    let (sealed_name, rest) = plaintext.split_at(split);
    if sealed_name != name.as_bytes() {
        return Err(CookieError::InvalidValue);
    }
    Ok(rest[1..].to_vec())
}

/// Encrypt the cookie's value and emit it as a `Set-Cookie` header.
///
/// # Errors
///
/// See [`seal`]; also [`CookieError::ValueTooLong`] from the transport layer.
pub fn write_encrypted(headers: &mut HeaderMap, cookie: Cookie<'_>, key: &[u8]) -> Result<(), CookieError> {
    let value = cookie.value().as_bytes().to_vec();
    write_encrypted_bytes(headers, cookie, &value, key)
}

/// Encrypt an arbitrary byte `value` and emit it under the cookie's name and
/// attributes. The cookie's own value is ignored.
pub fn write_encrypted_bytes(
    headers: &mut HeaderMap,
    cookie: Cookie<'_>,
    value: &[u8],
    key: &[u8],
) -> Result<(), CookieError> {
    let payload = seal(cookie.name(), value, key)?;
    transport::write_bytes(headers, cookie, &payload)
}

/// Read and decrypt the encrypted cookie `name`.
///
/// Returns `Ok(None)` if the cookie was not sent. An invalid key length is
/// reported even then, since it is a caller bug rather than client input.
pub fn read_encrypted(headers: &HeaderMap, name: &str, key: &[u8]) -> Result<Option<Vec<u8>>, CookieError> {
    let cipher = CookieCipher::new(key)?;
    let Some(payload) = transport::read(headers, name)? else {
        return Ok(None);
    };
    open_with(&cipher, name, &payload)
        .map(Some)
        .inspect_err(|_| debug!(cookie = name, "encrypted cookie rejected"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::tests::echo;
    use proptest::prelude::*;

    const KEY: [u8; 32] = [0x42; 32];

    fn round_trip(name: &str, value: &str, key: &[u8]) -> HeaderMap {
        let mut response = HeaderMap::new();
        write_encrypted(&mut response, Cookie::new(name.to_owned(), value.to_owned()), key).unwrap();
        echo(&response)
    }

    #[test]
    fn write_then_read_all_key_sizes() {
        for len in [16, 24, 32] {
            let key = vec![0x5A; len];
            let request = round_trip("session", "abc123", &key);
            assert_eq!(read_encrypted(&request, "session", &key).unwrap().unwrap(), b"abc123");
        }
    }

    #[test]
    fn value_is_not_visible_on_the_wire() {
        let mut response = HeaderMap::new();
        write_encrypted(&mut response, Cookie::new("card", "4111111111111111"), &KEY).unwrap();
        let raw = transport::read(&echo(&response), "card").unwrap().unwrap();
        assert!(!raw.windows(16).any(|w| w == b"4111111111111111"));
        assert_eq!(raw.len(), NONCE_LEN + "card:4111111111111111".len() + TAG_LEN);
    }

    #[test]
    fn non_utf8_value_round_trips() {
        let value = [0xffu8, 0x00, b':', 0x80];
        let mut response = HeaderMap::new();
        write_encrypted_bytes(&mut response, Cookie::new("bin", ""), &value, &KEY).unwrap();
        assert_eq!(read_encrypted(&echo(&response), "bin", &KEY).unwrap().unwrap(), value);
    }

    #[test]
    fn read_reports_bad_key_before_lookup() {
        let request = round_trip("session", "abc123", &KEY);
        assert_eq!(
            read_encrypted(&request, "session", &KEY[..20]),
            Err(CookieError::InvalidKeyLength { len: 20 })
        );
    }

    #[test]
    fn value_may_contain_separator() {
        let payload = seal("ids", b"a:b:c", &KEY).unwrap();
        assert_eq!(open("ids", &payload, &KEY).unwrap(), b"a:b:c");
    }

    #[test]
    fn invalid_key_length_is_configuration_error() {
        let mut response = HeaderMap::new();
        let result = write_encrypted(&mut response, Cookie::new("s", "v"), &[0u8; 20]);
        assert_eq!(result, Err(CookieError::InvalidKeyLength { len: 20 }));
        assert!(response.is_empty());
        assert_eq!(
            read_encrypted(&HeaderMap::new(), "s", &[0u8; 20]),
            Err(CookieError::InvalidKeyLength { len: 20 })
        );
    }

    #[test]
    fn name_with_colon_is_refused() {
        assert_eq!(seal("a:b", b"v", &KEY), Err(CookieError::InvalidName));
    }

    #[test]
    fn absent_cookie_is_none() {
        assert_eq!(read_encrypted(&HeaderMap::new(), "session", &KEY).unwrap(), None);
    }

    #[test]
    fn short_payload_is_invalid() {
        assert_eq!(open("s", &[0u8; NONCE_LEN - 1], &KEY), Err(CookieError::InvalidValue));
    }

    #[test]
    fn missing_separator_is_invalid() {
        let sealed = CookieCipher::new(&KEY).unwrap().seal(b"no-separator").unwrap();
        assert_eq!(open("no-separator", &sealed, &KEY), Err(CookieError::InvalidValue));
    }

    #[test]
    fn replay_under_other_name_is_invalid() {
        let payload = seal("role", b"admin", &KEY).unwrap();
        assert_eq!(open("nickname", &payload, &KEY), Err(CookieError::InvalidValue));
        // A name that is a prefix of the sealed one must not match either.
        assert_eq!(open("rol", &payload, &KEY), Err(CookieError::InvalidValue));
    }

    #[test]
    fn wrong_key_is_invalid() {
        let request = round_trip("session", "abc123", &KEY);
        assert_eq!(
            read_encrypted(&request, "session", &[0x43; 32]),
            Err(CookieError::InvalidValue)
        );
    }

    #[test]
    fn nonces_are_fresh() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            let payload = seal("session", b"abc123", &KEY).unwrap();
            assert!(seen.insert(payload[..NONCE_LEN].to_vec()), "nonce reused");
        }
    }

    proptest! {
        #[test]
        fn round_trip_any_bytes(value in proptest::collection::vec(any::<u8>(), 0..=512)) {
            let payload = seal("n", &value, &KEY).unwrap();
            prop_assert_eq!(open("n", &payload, &KEY).unwrap(), value);
        }

        #[test]
        fn any_bit_flip_is_rejected(
            value in proptest::collection::vec(any::<u8>(), 0..=64),
            bit in any::<usize>(),
        ) {
            let mut payload = seal("session", &value, &KEY).unwrap();
            let bit = bit % (payload.len() * 8);
            payload[bit / 8] ^= 1 << (bit % 8);
            prop_assert_eq!(open("session", &payload, &KEY), Err(CookieError::InvalidValue));
        }
    }
}
