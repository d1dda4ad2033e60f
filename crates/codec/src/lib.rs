//! Layered codec for carrying name/value pairs in HTTP cookies.
//!
//! Three layers, each building on the wire format of the one below:
//!
//! | Layer | Stored bytes (before base64url) |
//! |---|---|
//! | [`transport`] | `value` |
//! | [`signed`] | `HMAC-SHA256(key, name \|\| value) \|\| value` |
//! | [`encrypted`] | `nonce \|\| AES-GCM(name ":" value) \|\| tag` |
//!
//! Writers append a `Set-Cookie` header to a response [`http::HeaderMap`];
//! readers look the cookie up in a request's `Cookie` headers. Every call is
//! stateless: keys are borrowed for the call and never retained or logged.
//!
//! Read-time failures of any cause surface as the single
//! [`CookieError::InvalidValue`]. Callers should treat such a cookie as absent.

pub mod crypto;
pub mod encrypted;
pub mod error;
pub mod signed;
pub mod transport;

pub use encrypted::{read_encrypted, write_encrypted, write_encrypted_bytes};
pub use error::{CookieError, ErrorKind};
pub use signed::{read_signed, write_signed, write_signed_bytes};
pub use transport::{read, write, write_bytes, MAX_COOKIE_LEN};

pub use cookie::{Cookie, SameSite};
