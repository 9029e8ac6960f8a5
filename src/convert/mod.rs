//! Pluggable conversion between typed values and wire bytes.
//!
//! The dispatch layer never commits to a serialization format; it depends on
//! the [`Converter`] capability and nothing else. The crate ships
//! [`JsonConverter`] over `serde_json`; host applications can supply their
//! own implementation for other formats.
//!
//! # Envelope unwrapping
//!
//! Some backends wrap every payload in an envelope such as
//! `{"code":0,"data":{...}}`. A [`ResultDecoder`] hook rewrites the decoded
//! response text before structural decoding, so callers can decode the inner
//! payload directly. The hook is client-scoped configuration (see
//! [`ClientConfig`](crate::client::ClientConfig)), not process-wide state.
//!
//! # Examples
//!
//! ```
//! use relay_http::convert::{Converter, JsonConverter};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User { name: String }
//!
//! let converter = JsonConverter;
//! let user: User = converter.decode(br#"{"name":"ada"}"#).unwrap();
//! assert_eq!(user.name, "ada");
//! ```

mod json;

pub use json::JsonConverter;

use crate::error::{RelayError, Result};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Content type of JSON bodies produced by [`JsonConverter`].
pub const MEDIA_TYPE_JSON: &str = "application/json; charset=UTF-8";

/// Content type of urlencoded form bodies.
pub const MEDIA_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Hook rewriting decoded response text before structural decoding.
pub type ResultDecoder = Arc<dyn Fn(String) -> String + Send + Sync>;

/// A serialized request body plus its declared content type.
#[derive(Debug, Clone)]
pub struct EncodedBody {
    /// Value for the Content-Type header.
    pub content_type: &'static str,
    /// Serialized payload.
    pub bytes: Bytes,
}

/// Capability translating between typed values and wire bytes.
///
/// Implementations must be cheap to share (`Send + Sync`); the bundled
/// [`JsonConverter`] is a unit struct.
pub trait Converter: Send + Sync {
    /// Serialize `value` into a byte payload with a declared content type.
    fn encode<T: Serialize>(&self, value: &T) -> Result<EncodedBody>;

    /// Decode a byte payload into a typed value.
    ///
    /// A structurally absent result (empty payload, bare `null`) is a
    /// [`RelayError::Decode`] carrying the target type name.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;

    /// Decode after applying an optional [`ResultDecoder`] hook to the
    /// payload text.
    fn decode_with<T: DeserializeOwned>(
        &self,
        bytes: &[u8],
        decoder: Option<&ResultDecoder>,
    ) -> Result<T> {
        match decoder {
            Some(hook) => {
                let text = std::str::from_utf8(bytes).map_err(|e| RelayError::Decode {
                    target: std::any::type_name::<T>(),
                    reason: format!("response body is not valid UTF-8: {}", e),
                })?;
                let rewritten = hook(text.to_string());
                self.decode(rewritten.as_bytes())
            }
            None => self.decode(bytes),
        }
    }
}
