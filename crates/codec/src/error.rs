//! Error taxonomy shared by every codec layer.

use thiserror::Error;

/// Coarse classification of a [`CookieError`].
///
/// The set is closed: every failure lands in exactly one of these buckets.
/// All read-time failures collapse into [`ErrorKind::Validation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorKind {
    /// The caller handed the codec something it can never work with
    /// (bad key length, unusable cookie name) or the platform failed it.
    Configuration = 1,
    /// The serialized cookie exceeds the wire size ceiling.
    Size = 2,
    /// The stored cookie could not be decoded, authenticated, or bound to
    /// the requested name.
    Validation = 3,
}

/// Errors produced by the cookie codecs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CookieError {
    /// The AES key is not 16, 24, or 32 bytes long.
    #[error("invalid key length: {len} bytes (expected 16, 24, or 32)")]
    InvalidKeyLength {
        /// Length of the rejected key.
        len: usize,
    },

    /// The cookie name cannot be used with this codec.
    #[error("invalid cookie name")]
    InvalidName,

    /// The serialized cookie is not a legal HTTP header value.
    #[error("cookie does not form a valid header value")]
    InvalidHeader,

    /// The OS random number generator failed to produce a nonce.
    #[error("system randomness unavailable")]
    EntropyUnavailable,

    /// The serialized `Set-Cookie` string exceeds [`crate::MAX_COOKIE_LEN`].
    #[error("cookie value too long")]
    ValueTooLong,

    /// The stored cookie is malformed, tampered with, or bound to another name.
    #[error("invalid cookie value")]
    InvalidValue,
}

impl CookieError {
    /// Returns the [`ErrorKind`] this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CookieError::InvalidKeyLength { .. }
            | CookieError::InvalidName
            | CookieError::InvalidHeader
            | CookieError::EntropyUnavailable => ErrorKind::Configuration,
            CookieError::ValueTooLong => ErrorKind::Size,
            CookieError::InvalidValue => ErrorKind::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_closed_and_discriminated() {
        assert_eq!(ErrorKind::Configuration as u8, 1);
        assert_eq!(ErrorKind::Size as u8, 2);
        assert_eq!(ErrorKind::Validation as u8, 3);
    }

    #[test]
    fn variants_map_to_kinds() {
        assert_eq!(
            CookieError::InvalidKeyLength { len: 7 }.kind(),
            ErrorKind::Configuration
        );
        assert_eq!(CookieError::InvalidName.kind(), ErrorKind::Configuration);
        assert_eq!(CookieError::InvalidHeader.kind(), ErrorKind::Configuration);
        assert_eq!(
            CookieError::EntropyUnavailable.kind(),
            ErrorKind::Configuration
        );
        assert_eq!(CookieError::ValueTooLong.kind(), ErrorKind::Size);
        assert_eq!(CookieError::InvalidValue.kind(), ErrorKind::Validation);
    }

    #[test]
    fn key_length_display_includes_length() {
        let e = CookieError::InvalidKeyLength { len: 7 };
        assert!(e.to_string().contains("7 bytes"));
    }
}
