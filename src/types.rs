//! Core response type.

use crate::convert::Converter;
use crate::error::Result;
use crate::request::HeaderList;
use bytes::Bytes;
use serde::de::DeserializeOwned;

/// A fully-buffered HTTP response.
///
/// The dispatch layer reads the complete body before returning, so the bytes
/// can be inspected for logging and decoded any number of times without
/// consuming anything.
#[derive(Debug, Clone)]
pub struct RelayResponse {
    /// Response status code.
    pub status: u16,
    /// Final request URL, after any redirects the transport followed.
    pub url: String,
    /// Response headers in wire order.
    pub headers: HeaderList,
    /// The buffered body.
    pub body: Bytes,
}

impl RelayResponse {
    /// True for 2xx status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header value for `name`, if any.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// The body decoded as lossy UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body into `T` with the given converter.
    pub fn decode<T: DeserializeOwned>(&self, converter: &impl Converter) -> Result<T> {
        converter.decode(&self.body)
    }
}
