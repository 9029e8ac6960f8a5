//! Error types and result handling.
//!
//! All fallible operations in this crate return [`Result`], an alias over
//! [`RelayError`]. The variants map onto the three failure classes the crate
//! actually has:
//!
//! | Variant | Class | Propagation |
//! |---------|-------|-------------|
//! | [`RelayError::Http`] | transport failure from `reqwest` | surfaced to the caller of the dispatch |
//! | [`RelayError::UrlParse`], [`RelayError::HeaderParse`] | malformed request input | surfaced at dispatch time |
//! | [`RelayError::Encode`], [`RelayError::Decode`] | converter failure | surfaced to the caller of the conversion |
//! | [`RelayError::Status`] | non-2xx response on a typed fetch | surfaced to the caller of the conversion |
//!
//! Diagnostic-formatting failures are deliberately absent here: logging is
//! best-effort and never propagates (see [`crate::diagnostics`]).
//!
//! Null-argument precondition violations have no representation either; the
//! type system removes that class of error entirely.

use thiserror::Error;

/// Result type alias for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;

/// Errors that can occur while building, dispatching, or converting a request.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Transport-level failure reported by the underlying HTTP client.
    #[error("http transport error: {0}")]
    Http(String),

    /// The request URL could not be parsed.
    #[error("invalid url: {0}")]
    UrlParse(String),

    /// A header name or value was rejected when the request was built.
    #[error("invalid header: {0}")]
    HeaderParse(String),

    /// A typed value could not be serialized into a request body.
    #[error("request body encoding failed: {0}")]
    Encode(String),

    /// A response body could not be decoded into the requested type.
    ///
    /// Carries the target type name for diagnostics, so a failed
    /// `fetch::<User>` reads as `could not decode response body as
    /// relay_http::User`.
    #[error("could not decode response body as {target}: {reason}")]
    Decode {
        /// Name of the type the body was being decoded into.
        target: &'static str,
        /// Human-readable decoder failure.
        reason: String,
    },

    /// The server answered a typed fetch with a non-2xx status.
    #[error("HTTP status {code} for {url}")]
    Status {
        /// The response status code.
        code: u16,
        /// The final request URL.
        url: String,
    },
}

impl RelayError {
    /// True for failures that happened before or on the wire, where the
    /// response never carried usable context of its own.
    pub fn is_transport(&self) -> bool {
        matches!(self, RelayError::Http(_) | RelayError::UrlParse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_names_target_type() {
        let err = RelayError::Decode {
            target: std::any::type_name::<u32>(),
            reason: "empty response body".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("u32"));
        assert!(msg.contains("empty response body"));
    }

    #[test]
    fn transport_classification() {
        assert!(RelayError::Http("connection refused".into()).is_transport());
        assert!(RelayError::UrlParse("no scheme".into()).is_transport());
        assert!(!RelayError::Status { code: 404, url: "http://x/".into() }.is_transport());
    }
}
