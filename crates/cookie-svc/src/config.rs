//! Configuration loading and validation for the cookie service.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or invalid.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::keys::Keys;

/// Validated cookie service configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Base64 HMAC key for signed cookies. **Required.**
    pub signing_key: String,

    /// Base64 AES key (16, 24, or 32 bytes) for encrypted cookies. **Required.**
    pub encryption_key: String,

    /// Port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// `Path` attribute set on every written cookie.
    #[serde(default = "default_cookie_path")]
    pub cookie_path: String,

    /// Whether written cookies carry the `Secure` attribute.
    #[serde(default = "default_cookie_secure")]
    pub cookie_secure: bool,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_listen_port() -> u16 {
    8080
}
fn default_cookie_path() -> String {
    "/".into()
}
fn default_cookie_secure() -> bool {
    true
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Decode the configured keys.
    ///
    /// # Errors
    ///
    /// Returns an error if either key is not valid base64 or the encryption
    /// key has an unsupported length.
    pub fn keys(&self) -> Result<Keys> {
        Keys::from_base64(&self.signing_key, &self.encryption_key)
            .context("invalid key material")
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.signing_key, "SIGNING_KEY")?;
        ensure_non_empty(&self.encryption_key, "ENCRYPTION_KEY")?;

        if self.listen_port == 0 {
            anyhow::bail!("LISTEN_PORT must be > 0");
        }
        if !self.cookie_path.starts_with('/') {
            anyhow::bail!("COOKIE_PATH must start with '/'");
        }
        self.keys()?;
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("signing_key", &"[REDACTED]")
            .field("encryption_key", &"[REDACTED]")
            .field("listen_port", &self.listen_port)
            .field("cookie_path", &self.cookie_path)
            .field("cookie_secure", &self.cookie_secure)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // 32 bytes of 0x01 and 32 bytes of 0x02.
    const SIGNING_B64: &str = "AQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQE=";
    const ENCRYPTION_B64: &str = "AgICAgICAgICAgICAgICAgICAgICAgICAgICAgICAgI=";

    fn valid() -> Config {
        Config {
            signing_key: SIGNING_B64.into(),
            encryption_key: ENCRYPTION_B64.into(),
            listen_port: default_listen_port(),
            cookie_path: default_cookie_path(),
            cookie_secure: default_cookie_secure(),
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_listen_port(), 8080);
        assert_eq!(default_cookie_path(), "/");
        assert!(default_cookie_secure());
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_accepts_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_signing_key() {
        let cfg = Config {
            signing_key: "".into(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_encryption_key_length() {
        let cfg = Config {
            // 20 bytes.
            encryption_key: "AAAAAAAAAAAAAAAAAAAAAAAAAAA=".into(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_relative_cookie_path() {
        let cfg = Config {
            cookie_path: "app".into(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn debug_redacts_keys() {
        let out = format!("{:?}", valid());
        assert!(!out.contains(SIGNING_B64));
        assert!(!out.contains(ENCRYPTION_B64));
    }
}
