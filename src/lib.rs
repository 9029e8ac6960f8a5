#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Relay-HTTP: Fluent Requests over reqwest
//!
//! This crate is a request-builder and response-converter layer on top of
//! `reqwest`: compose URL, headers, query/body parameters, caching policy and
//! tags through a chainable API, dispatch through the wrapped HTTP client,
//! and convert the raw response body into a typed result, with optional
//! diagnostic logging of request/response traffic.
//!
//! ## Key Features
//!
//! - **Fluent request descriptors**: value-chaining setters over an
//!   insertion-ordered parameter map and header multi-map
//! - **Body modes**: query-string, urlencoded form, JSON object, multipart
//! - **Pluggable conversion**: the [`Converter`] capability turns bytes into
//!   typed values; [`JsonConverter`] over `serde_json` is bundled
//! - **Assembly**: client-wide common parameters injected per request, with a
//!   per-descriptor opt-out
//! - **Diagnostics**: human-readable request/response reconstruction with
//!   multipart introspection and a plaintext-vs-binary heuristic, emitted via
//!   `tracing` and disabled by default
//!
//! ## Client Usage
//!
//! ```ignore
//! use relay_http::{JsonConverter, RelayClient, RequestDescriptor};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User { id: u64, name: String }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RelayClient::new();
//!
//!     let descriptor = RequestDescriptor::post("http://example.com/users")
//!         .add("name", "ada")
//!         .add("age", 36)
//!         .add_header("X-Trace", "abc123")
//!         .as_json();
//!
//!     let user: User = client.fetch(descriptor, &JsonConverter).await?;
//!     println!("created user {}", user.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - **[request]** - request descriptor, headers, parameters, body modes
//! - **[client]** - dispatch layer wrapping `reqwest`
//! - **[convert]** - converter capability and the bundled JSON converter
//! - **[diagnostics]** - request/response log reconstruction
//! - **[error]** - error types and result handling
//! - **[types]** - the buffered response type

pub mod client;
pub mod convert;
pub mod diagnostics;
pub mod error;
pub mod request;
pub mod types;

pub use client::{ClientConfig, RelayClient};
pub use convert::{Converter, EncodedBody, JsonConverter, ResultDecoder};
pub use diagnostics::Diagnostics;
pub use error::{RelayError, Result};
pub use request::{BodyKind, HeaderList, Method, MultipartPart, ParamMap, RequestDescriptor};
pub use types::RelayResponse;
