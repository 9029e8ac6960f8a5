//! Request description and fluent accumulation.
//!
//! A [`RequestDescriptor`] is the mutable specification of one logical HTTP
//! request: URL, method, headers, parameters, body mode, cache directive and
//! tag. It is built by the caller through value-chaining setters and consumed
//! once by [`RelayClient::execute`](crate::client::RelayClient::execute).
//!
//! # Module Organization
//!
//! ```text
//! request/
//! ├── headers - ordered header multi-map
//! ├── params  - insertion-ordered parameter map
//! └── body    - body modes and multipart parts
//! ```
//!
//! # Examples
//!
//! ```
//! use relay_http::request::RequestDescriptor;
//!
//! let descriptor = RequestDescriptor::post("http://example.com/users")
//!     .add("name", "ada")
//!     .add("age", 36)
//!     .add_header("X-Trace", "abc123")
//!     .as_json();
//!
//! assert_eq!(descriptor.header("x-trace"), Some("abc123"));
//! ```

mod body;
mod headers;
mod params;

pub use body::{BodyKind, MultipartPart};
pub use headers::HeaderList;
pub use params::ParamMap;

use crate::convert::{EncodedBody, MEDIA_TYPE_FORM, MEDIA_TYPE_JSON};
use crate::error::{RelayError, Result};
use bytes::Bytes;
use serde_json::Value;
use std::fmt;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET
    Get,
    /// HEAD
    Head,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
    /// PATCH
    Patch,
}

impl Method {
    /// Upper-case method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
        }
    }

    /// Convert to the transport's method type.
    pub fn to_http(self) -> http::Method {
        match self {
            Method::Get => http::Method::GET,
            Method::Head => http::Method::HEAD,
            Method::Post => http::Method::POST,
            Method::Put => http::Method::PUT,
            Method::Delete => http::Method::DELETE,
            Method::Patch => http::Method::PATCH,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable, chainable request specification.
///
/// Every mutator takes `mut self` and returns `Self`, so a request reads as
/// one expression. The descriptor is plain data; nothing here touches the
/// network.
///
/// # Lifecycle
///
/// 1. Created per logical request via [`RequestDescriptor::new`] or a method
///    shorthand
/// 2. Mutated through chained setters
/// 3. Consumed once by the dispatch layer
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// Request URL without query parameters.
    pub url: String,
    /// Request method.
    pub method: Method,
    /// Accumulated headers, in insertion order.
    pub headers: HeaderList,
    /// Accumulated parameters, in insertion order.
    pub params: ParamMap,
    /// How parameters become the wire body.
    pub body: BodyKind,
    /// Multipart parts, when `body` is [`BodyKind::Multipart`].
    pub parts: Vec<MultipartPart>,
    /// Cache-Control directive sent with the request, if any.
    pub cache: Option<String>,
    /// Opaque caller-attached tag for identification in logs and by calling
    /// code.
    pub tag: Option<String>,
    /// Whether client-wide common parameters are injected at dispatch.
    pub assembly_enabled: bool,
}

impl RequestDescriptor {
    /// Create a descriptor for `url` with the given method.
    ///
    /// GET, HEAD and DELETE default to query-string parameters; POST, PUT and
    /// PATCH default to a form body. Use [`as_json`](Self::as_json) or
    /// [`as_form`](Self::as_form) to override.
    pub fn new(url: impl Into<String>, method: Method) -> Self {
        let body = match method {
            Method::Get | Method::Head | Method::Delete => BodyKind::Query,
            Method::Post | Method::Put | Method::Patch => BodyKind::Form,
        };
        RequestDescriptor {
            url: url.into(),
            method,
            headers: HeaderList::new(),
            params: ParamMap::new(),
            body,
            parts: Vec::new(),
            cache: None,
            tag: None,
            assembly_enabled: true,
        }
    }

    /// Shorthand for a GET descriptor.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url, Method::Get)
    }

    /// Shorthand for a HEAD descriptor.
    pub fn head(url: impl Into<String>) -> Self {
        Self::new(url, Method::Head)
    }

    /// Shorthand for a POST descriptor.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(url, Method::Post)
    }

    /// Shorthand for a PUT descriptor.
    pub fn put(url: impl Into<String>) -> Self {
        Self::new(url, Method::Put)
    }

    /// Shorthand for a DELETE descriptor.
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(url, Method::Delete)
    }

    /// Shorthand for a PATCH descriptor.
    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(url, Method::Patch)
    }

    /// Replace the URL.
    ///
    /// No validation happens here; an unparsable URL surfaces as
    /// [`RelayError::UrlParse`] at dispatch.
    pub fn set_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Append a header, keeping existing values for the same name.
    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add(name, value);
        self
    }

    /// Append a header from a raw `Name: value` line.
    ///
    /// Malformed lines are ignored; see [`HeaderList::add_line`].
    pub fn add_header_line(mut self, line: &str) -> Self {
        self.headers.add_line(line);
        self
    }

    /// Replace all values for a header name.
    pub fn set_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// First header value for `name`, if any.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Remove every value for a header name.
    pub fn remove_all_headers(mut self, name: &str) -> Self {
        self.headers.remove_all(name);
        self
    }

    /// Add a parameter. `Value::Null` is stored as an empty string.
    pub fn add(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Bulk-add parameters; a no-op on empty input.
    pub fn add_all(mut self, pairs: impl IntoIterator<Item = (String, Value)>) -> Self {
        self.params.extend(pairs);
        self
    }

    /// Add a multipart part and switch the body mode to multipart.
    pub fn add_part(mut self, part: MultipartPart) -> Self {
        self.body = BodyKind::Multipart;
        self.parts.push(part);
        self
    }

    /// Send parameters as a urlencoded form body.
    pub fn as_form(mut self) -> Self {
        self.body = BodyKind::Form;
        self
    }

    /// Send parameters as a JSON object body.
    pub fn as_json(mut self) -> Self {
        self.body = BodyKind::Json;
        self
    }

    /// Set the Cache-Control directive sent with the request.
    pub fn cache_control(mut self, directive: impl Into<String>) -> Self {
        self.cache = Some(directive.into());
        self
    }

    /// Attach an opaque tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Toggle injection of client-wide common parameters for this request.
    pub fn assembly_enabled(mut self, enabled: bool) -> Self {
        self.assembly_enabled = enabled;
        self
    }

    /// Encode the parameter map into a body, per the body mode.
    ///
    /// `Query` and `Multipart` return `None`; their payloads are carried by
    /// the URL and the parts list respectively.
    pub(crate) fn encoded_body(&self) -> Result<Option<EncodedBody>> {
        match self.body {
            BodyKind::Query | BodyKind::Multipart => Ok(None),
            BodyKind::Form => {
                let pairs = self.params.to_pairs();
                let encoded = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                    .finish();
                Ok(Some(EncodedBody {
                    content_type: MEDIA_TYPE_FORM,
                    bytes: Bytes::from(encoded),
                }))
            }
            BodyKind::Json => {
                let object: serde_json::Map<String, Value> = self
                    .params
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                let bytes = serde_json::to_vec(&object)
                    .map_err(|e| RelayError::Encode(e.to_string()))?;
                Ok(Some(EncodedBody {
                    content_type: MEDIA_TYPE_JSON,
                    bytes: Bytes::from(bytes),
                }))
            }
        }
    }
}

impl fmt::Display for RequestDescriptor {
    /// Deterministic multi-line dump for debugging. Not a wire format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RequestDescriptor {{")?;
        writeln!(f, "  url = {}", self.url)?;
        writeln!(f, "  method = {}", self.method)?;
        writeln!(f, "  params = {{ {} }}", self.params.to_key_value())?;
        let headers = self
            .headers
            .iter()
            .map(|(n, v)| format!("{}: {}", n, v))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "  headers = {{ {} }}", headers)?;
        writeln!(f, "  assembly_enabled = {}", self.assembly_enabled)?;
        writeln!(f, "  tag = {}", self.tag.as_deref().unwrap_or("-"))?;
        writeln!(f, "  cache = {}", self.cache.as_deref().unwrap_or("-"))?;
        write!(f, "}}")
    }
}
