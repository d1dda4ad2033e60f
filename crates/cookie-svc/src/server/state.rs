//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::keys::Keys;

/// Application state shared across all request handlers.
///
/// All fields are cheaply cloneable so that Axum can clone the state for each
/// request without copying key material.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Signing and encryption keys.
    pub keys: Keys,
    /// `Path` attribute for written cookies.
    pub cookie_path: Arc<String>,
    /// Whether written cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
}

impl AppState {
    /// Create a new [`AppState`].
    pub fn new(keys: Keys, cookie_path: String, cookie_secure: bool) -> Self {
        Self {
            keys,
            cookie_path: Arc::new(cookie_path),
            cookie_secure,
        }
    }
}

#[cfg(test)]
impl Default for AppState {
    /// Fixed test keys; never use outside tests.
    fn default() -> Self {
        let keys = Keys::new(vec![0x11; 32], vec![0x22; 32]).expect("test keys are valid");
        Self::new(keys, "/".into(), false)
    }
}
