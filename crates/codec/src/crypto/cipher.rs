//! AES-GCM sealing and opening of cookie payloads.
//!
//! **Algorithm choice:** AES-GCM with a random 96-bit nonce per call. The key
//! length picks the variant: 16 bytes for AES-128, 24 for AES-192, 32 for
//! AES-256.
//!
//! **Never reuse a nonce under the same key.** GCM nonce reuse is catastrophic:
//! it breaks both confidentiality and authentication. Nonces come from the OS
//! CSPRNG on every [`CookieCipher::seal`] call and a failing RNG aborts the call.

use aes_gcm::{
    aead::{consts::U12, rand_core::RngCore, Aead, KeyInit, OsRng},
    aes::Aes192,
    Aes128Gcm, Aes256Gcm, AesGcm, Nonce,
};

use crate::error::CookieError;

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the AES-GCM authentication tag.
pub const TAG_LEN: usize = 16;

type Aes192Gcm = AesGcm<Aes192, U12>;

/// An AES-GCM context built from a caller-supplied key.
///
/// Built per call and dropped with it.
pub enum CookieCipher {
    /// AES-128-GCM (16-byte key).
    Aes128(Aes128Gcm),
    /// AES-192-GCM (24-byte key).
    Aes192(Aes192Gcm),
    /// AES-256-GCM (32-byte key).
    Aes256(Aes256Gcm),
}

impl CookieCipher {
    /// Construct a cipher for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CookieError::InvalidKeyLength`] unless `key` is 16, 24, or 32
    /// bytes long.
    pub fn new(key: &[u8]) -> Result<Self, CookieError> {
        let invalid = |_| CookieError::InvalidKeyLength { len: key.len() };
        match key.len() {
            16 => Aes128Gcm::new_from_slice(key).map(Self::Aes128).map_err(invalid),
            24 => Aes192Gcm::new_from_slice(key).map(Self::Aes192).map_err(invalid),
            32 => Aes256Gcm::new_from_slice(key).map(Self::Aes256).map_err(invalid),
            len => Err(CookieError::InvalidKeyLength { len }),
        }
    }

    /// Encrypt `plaintext` under a fresh random nonce.
    ///
    /// Returns `nonce || ciphertext || tag`.
    ///
    /// # Errors
    ///
    /// Returns [`CookieError::EntropyUnavailable`] if the OS RNG fails.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>, CookieError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng
            .try_fill_bytes(&mut nonce_bytes)
            .map_err(|_| CookieError::EntropyUnavailable)?;
        let nonce = Nonce::<U12>::from_slice(&nonce_bytes);

        let ciphertext = match self {
            Self::Aes128(c) => c.encrypt(nonce, plaintext),
            Self::Aes192(c) => c.encrypt(nonce, plaintext),
            Self::Aes256(c) => c.encrypt(nonce, plaintext),
        }
        // Only reachable for plaintexts beyond the GCM length limit.
        .map_err(|_| CookieError::ValueTooLong)?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    /// Split off the nonce, then decrypt and authenticate the remainder.
    ///
    /// # Errors
    ///
    /// Returns [`CookieError::InvalidValue`] for a truncated payload or any
    /// authentication failure. The causes are not distinguished.
    pub fn open(&self, sealed: &[u8]) -> Result<Vec<u8>, CookieError> {
        if sealed.len() < NONCE_LEN {
            return Err(CookieError::InvalidValue);
        }
        let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LEN);
        let nonce = Nonce::<U12>::from_slice(nonce_bytes);

        match self {
            Self::Aes128(c) => c.decrypt(nonce, ciphertext),
            Self::Aes192(c) => c.decrypt(nonce, ciphertext),
            Self::Aes256(c) => c.decrypt(nonce, ciphertext),
        }
        .map_err(|_| CookieError::InvalidValue)
    }
}

impl std::fmt::Debug for CookieCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bits = match self {
            Self::Aes128(_) => 128,
            Self::Aes192(_) => 192,
            Self::Aes256(_) => 256,
        };
        write!(f, "CookieCipher(AES-{bits}-GCM)")
    }
}
