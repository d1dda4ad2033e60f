//! Keyed primitives behind the signed and encrypted layers.
//!
//! This module is free of HTTP and cookie concerns. It only turns keys and
//! bytes into tags and sealed payloads.
//!
//! # Sealed payload format
//!
//! ```text
//! nonce (12 bytes) || AES-GCM ciphertext || tag (16 bytes)
//! ```
//!
//! Keys are borrowed for the duration of a call and never stored.

pub mod cipher;
pub mod mac;

pub use cipher::{CookieCipher, NONCE_LEN, TAG_LEN};
pub use mac::SIGNATURE_LEN;
