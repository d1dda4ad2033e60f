//! [`Keys`]: the signing and encryption keys the service hands to the codec.
//!
//! # Security invariants
//!
//! - Key bytes are **never** logged or included in traces; `Debug` is redacted.
//! - Key buffers are zeroed when the last handle is dropped.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Minimum recommended HMAC key length. Shorter keys are accepted with a warning.
pub const RECOMMENDED_SIGNING_KEY_LEN: usize = 32;

/// Errors produced while decoding key material.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The configured value is not valid base64.
    #[error("{0} is not valid base64")]
    Decode(&'static str),

    /// The signing key decoded to zero bytes.
    #[error("signing key must not be empty")]
    EmptySigningKey,

    /// The encryption key is not a valid AES key length.
    #[error("encryption key has invalid length: expected 16, 24, or 32 bytes, got {0}")]
    InvalidLength(usize),
}

/// Heap buffer holding raw key bytes.
///
/// When this type is dropped, the memory is overwritten with zeroes to
/// minimise the window during which key material lives in RAM.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct KeyBytes(Box<[u8]>);

impl KeyBytes {
    /// Borrow the raw key bytes.
    pub fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for KeyBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material, not even in debug builds.
        f.write_str("KeyBytes([REDACTED])")
    }
}

/// Signing and encryption keys, cheaply cloneable across handlers.
#[derive(Clone, Debug)]
pub struct Keys {
    signing: Arc<KeyBytes>,
    encryption: Arc<KeyBytes>,
}

impl Keys {
    /// Build from raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::EmptySigningKey`] for an empty signing key and
    /// [`KeyError::InvalidLength`] unless the encryption key is 16, 24, or 32
    /// bytes.
    pub fn new(signing: Vec<u8>, encryption: Vec<u8>) -> Result<Self, KeyError> {
        if signing.is_empty() {
            return Err(KeyError::EmptySigningKey);
        }
        if !matches!(encryption.len(), 16 | 24 | 32) {
            return Err(KeyError::InvalidLength(encryption.len()));
        }
        Ok(Self {
            signing: Arc::new(KeyBytes(signing.into_boxed_slice())),
            encryption: Arc::new(KeyBytes(encryption.into_boxed_slice())),
        })
    }

    /// Decode both keys from standard base64.
    pub fn from_base64(signing: &str, encryption: &str) -> Result<Self, KeyError> {
        let signing = STANDARD
            .decode(signing.trim())
            .map_err(|_| KeyError::Decode("SIGNING_KEY"))?;
        let encryption = STANDARD
            .decode(encryption.trim())
            .map_err(|_| KeyError::Decode("ENCRYPTION_KEY"))?;
        Self::new(signing, encryption)
    }

    /// HMAC key for signed cookies.
    pub fn signing(&self) -> &[u8] {
        self.signing.expose()
    }

    /// AES key for encrypted cookies.
    pub fn encryption(&self) -> &[u8] {
        self.encryption.expose()
    }

    /// Returns `true` if the signing key is shorter than recommended.
    pub fn signing_key_is_weak(&self) -> bool {
        self.signing().len() < RECOMMENDED_SIGNING_KEY_LEN
    }
}
