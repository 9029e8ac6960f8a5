//! Relay HTTP client implementation.
//!
//! This module provides the dispatch layer: it consumes a
//! [`RequestDescriptor`](crate::request::RequestDescriptor), injects
//! client-wide common parameters (assembly), hands the request to the wrapped
//! `reqwest::Client`, and buffers the response for conversion and diagnostic
//! logging.
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── fetch  - RelayClient and HTTP dispatch
//! └── config - client configuration
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RelayClient`] | Main HTTP client |
//! | [`ClientConfig`] | Client configuration options |
//!
//! # Examples
//!
//! ```
//! use relay_http::client::{ClientConfig, RelayClient};
//!
//! // Default configuration
//! let client = RelayClient::new();
//!
//! // Custom configuration
//! let config = ClientConfig {
//!     request_timeout_ms: 5_000,
//!     enable_logging: true,
//!     ..Default::default()
//! };
//! let client = RelayClient::with_config(config);
//! ```
//!
//! Transport concerns beyond the options in [`ClientConfig`] — TLS,
//! connection pooling, cancellation — are properties of `reqwest` and are
//! not re-modeled here.

mod config;
mod fetch;

pub use config::ClientConfig;
pub use fetch::RelayClient;
