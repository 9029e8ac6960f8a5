//! Client configuration.

use crate::convert::ResultDecoder;
use serde_json::Value;
use std::fmt;

/// Configuration options for [`RelayClient`](crate::client::RelayClient).
///
/// Everything request-independent lives here: transport tuning, the
/// diagnostic-logging switch, the envelope-unwrapping hook, and the common
/// parameters injected into every request that keeps assembly enabled.
///
/// # Examples
///
/// ```
/// use relay_http::client::ClientConfig;
///
/// let config = ClientConfig {
///     enable_logging: true,
///     common_params: vec![("version".into(), "1.2.0".into())],
///     ..Default::default()
/// };
/// assert_eq!(config.request_timeout_ms, 30_000);
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Maximum idle connections kept per host.
    pub max_total_connections: u32,
    /// Proxy URL; empty string disables proxying.
    pub proxy_url: String,
    /// Enables diagnostic request/response logging.
    pub enable_logging: bool,
    /// Hook rewriting response text before decoding and display.
    pub result_decoder: Option<ResultDecoder>,
    /// Parameters injected into every assembled request, for keys the
    /// request does not already set.
    pub common_params: Vec<(String, Value)>,
    /// Headers injected into every assembled request, for names the request
    /// does not already set.
    pub common_headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            request_timeout_ms: 30_000,
            max_total_connections: 32,
            proxy_url: String::new(),
            enable_logging: false,
            result_decoder: None,
            common_params: Vec::new(),
            common_headers: Vec::new(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("max_total_connections", &self.max_total_connections)
            .field("proxy_url", &self.proxy_url)
            .field("enable_logging", &self.enable_logging)
            .field("result_decoder", &self.result_decoder.is_some())
            .field("common_params", &self.common_params)
            .field("common_headers", &self.common_headers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout_ms, 30_000);
        assert_eq!(config.max_total_connections, 32);
        assert!(config.proxy_url.is_empty());
        assert!(!config.enable_logging);
        assert!(config.result_decoder.is_none());
    }

    #[test]
    fn debug_does_not_require_hook_to_be_debug() {
        let config = ClientConfig {
            result_decoder: Some(std::sync::Arc::new(|s| s)),
            ..Default::default()
        };
        assert!(format!("{:?}", config).contains("result_decoder: true"));
    }
}
