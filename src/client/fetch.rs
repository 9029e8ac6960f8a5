//! Main relay HTTP client implementation.
//!
//! Provides the primary `RelayClient` that dispatches [`RequestDescriptor`]s
//! through a wrapped `reqwest::Client` and converts responses into typed
//! values.
//!
//! # Examples
//!
//! ## Simple GET request
//!
//! ```ignore
//! use relay_http::RelayClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RelayClient::new();
//!     let response = client.get("http://example.com/api/data").await?;
//!     println!("Status: {}", response.status);
//!     Ok(())
//! }
//! ```
//!
//! ## Typed fetch with the JSON converter
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
//!     let descriptor = RequestDescriptor::get("http://example.com/users/1")
//!         .add("expand", "profile");
//!     let user: User = client.fetch(descriptor, &JsonConverter).await?;
//!     println!("{}", user.name);
//!     Ok(())
//! }
//! ```

use crate::client::config::ClientConfig;
use crate::convert::Converter;
use crate::diagnostics::Diagnostics;
use crate::error::{RelayError, Result};
use crate::request::{BodyKind, HeaderList, RequestDescriptor};
use crate::types::RelayResponse;
use http::header::{HeaderName, HeaderValue, CACHE_CONTROL, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

/// The main relay HTTP client.
///
/// Wraps a `reqwest::Client` and carries the client-scoped configuration:
/// transport tuning, common-parameter assembly, and diagnostics. Cloning is
/// cheap; the underlying connection pool is shared.
#[derive(Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
    diagnostics: Diagnostics,
}

impl RelayClient {
    /// Create a client with default configuration.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Self {
        let mut builder = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .pool_max_idle_per_host(config.max_total_connections as usize);

        if !config.proxy_url.is_empty() {
            if let Ok(proxy) = reqwest::Proxy::all(&config.proxy_url) {
                builder = builder.proxy(proxy);
            }
        }

        let client = builder.build().unwrap_or_default();

        let mut diagnostics = Diagnostics::new(config.enable_logging);
        if let Some(hook) = &config.result_decoder {
            diagnostics = diagnostics.with_result_decoder(hook.clone());
        }

        RelayClient {
            client,
            config: Arc::new(config),
            diagnostics,
        }
    }

    /// Make a simple GET request.
    ///
    /// # Examples
    /// ```ignore
    /// let response = client.get("http://example.com/api/data").await?;
    /// ```
    pub async fn get(&self, url: &str) -> Result<RelayResponse> {
        self.execute(RequestDescriptor::get(url)).await
    }

    /// Dispatch a descriptor and return the buffered response.
    ///
    /// The descriptor is consumed; common parameters are injected first when
    /// its assembly flag is set. The response body is fully buffered, so
    /// diagnostic logging never consumes bytes the caller still needs.
    pub async fn execute(&self, mut descriptor: RequestDescriptor) -> Result<RelayResponse> {
        self.assemble(&mut descriptor);
        self.diagnostics.log_request(&descriptor);

        match self.execute_inner(&descriptor).await {
            Ok(response) => {
                self.diagnostics.log_response(descriptor.method, &response);
                Ok(response)
            }
            Err(error) => {
                self.diagnostics.log_error(&descriptor, &error);
                Err(error)
            }
        }
    }

    /// Dispatch a descriptor and decode the body into `T`.
    ///
    /// Non-2xx responses fail with [`RelayError::Status`] before any decoding
    /// happens. The client's result-decoder hook, if configured, is applied
    /// to the body text before structural decoding.
    pub async fn fetch<T, C>(&self, descriptor: RequestDescriptor, converter: &C) -> Result<T>
    where
        T: DeserializeOwned,
        C: Converter,
    {
        let response = self.execute(descriptor).await?;
        if !response.is_success() {
            let error = RelayError::Status {
                code: response.status,
                url: response.url.clone(),
            };
            if self.diagnostics.is_enabled() {
                tracing::warn!("{}", error);
            }
            return Err(error);
        }
        converter.decode_with(&response.body, self.config.result_decoder.as_ref())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Inject common parameters and headers for requests that keep assembly
    /// enabled. Per-request values always win.
    fn assemble(&self, descriptor: &mut RequestDescriptor) {
        if !descriptor.assembly_enabled {
            return;
        }
        for (key, value) in &self.config.common_params {
            if !descriptor.params.contains_key(key) {
                descriptor.params.insert(key.clone(), value.clone());
            }
        }
        for (name, value) in &self.config.common_headers {
            if descriptor.headers.get(name).is_none() {
                descriptor.headers.add(name.clone(), value.clone());
            }
        }
    }

    /// Build and send the transport request, then buffer the response.
    async fn execute_inner(&self, descriptor: &RequestDescriptor) -> Result<RelayResponse> {
        let url = Url::parse(&descriptor.url)
            .map_err(|e| RelayError::UrlParse(format!("{}: {}", descriptor.url, e)))?;

        let mut builder = self.client.request(descriptor.method.to_http(), url);

        for (name, value) in &descriptor.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| RelayError::HeaderParse(format!("{}: {}", name, e)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| RelayError::HeaderParse(format!("{}: {}", name, e)))?;
            builder = builder.header(header_name, header_value);
        }

        if let Some(directive) = &descriptor.cache {
            builder = builder.header(CACHE_CONTROL, directive.as_str());
        }

        match descriptor.body {
            BodyKind::Query => {
                let pairs = descriptor.params.to_pairs();
                if !pairs.is_empty() {
                    builder = builder.query(&pairs);
                }
            }
            BodyKind::Form | BodyKind::Json => {
                if let Some(body) = descriptor.encoded_body()? {
                    builder = builder
                        .header(CONTENT_TYPE, body.content_type)
                        .body(body.bytes);
                }
            }
            BodyKind::Multipart => {
                builder = builder.multipart(multipart_form(descriptor)?);
            }
        }

        let response = builder
            .send()
            .await
            .map_err(|e| RelayError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();

        let mut headers = HeaderList::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.add(name.as_str(), value);
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RelayError::Http(e.to_string()))?;

        Ok(RelayResponse {
            status,
            url: final_url,
            headers,
            body,
        })
    }
}

impl Default for RelayClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Assemble the transport multipart form from the descriptor's parts.
fn multipart_form(descriptor: &RequestDescriptor) -> Result<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new();
    for part in &descriptor.parts {
        let mut piece = reqwest::multipart::Part::bytes(part.body.to_vec());
        if let Some(file_name) = &part.file_name {
            piece = piece.file_name(file_name.clone());
        }
        if let Some(content_type) = &part.content_type {
            piece = piece
                .mime_str(content_type)
                .map_err(|e| RelayError::Encode(format!("part {}: {}", part.name, e)))?;
        }
        form = form.part(part.name.clone(), piece);
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn client_creation_uses_defaults() {
        let client = RelayClient::new();
        assert_eq!(client.config().request_timeout_ms, 30_000);
        assert!(!client.config().enable_logging);
    }

    #[test]
    fn assembly_injects_only_absent_keys() {
        let client = RelayClient::with_config(ClientConfig {
            common_params: vec![
                ("version".into(), Value::from("1.2.0")),
                ("user".into(), Value::from("default")),
            ],
            common_headers: vec![("X-Client".into(), "relay".into())],
            ..Default::default()
        });
        let mut descriptor = RequestDescriptor::get("http://x/").add("user", "ada");
        client.assemble(&mut descriptor);
        assert_eq!(descriptor.params.get("version"), Some(&Value::from("1.2.0")));
        assert_eq!(descriptor.params.get("user"), Some(&Value::from("ada")));
        assert_eq!(descriptor.header("X-Client"), Some("relay"));
    }

    #[test]
    fn assembly_respects_disabled_flag() {
        let client = RelayClient::with_config(ClientConfig {
            common_params: vec![("version".into(), Value::from("1.2.0"))],
            ..Default::default()
        });
        let mut descriptor = RequestDescriptor::get("http://x/").assembly_enabled(false);
        client.assemble(&mut descriptor);
        assert!(descriptor.params.is_empty());
    }

    #[tokio::test]
    async fn invalid_header_name_is_rejected_at_dispatch() {
        let client = RelayClient::new();
        let descriptor = RequestDescriptor::get("http://localhost/").add_header("bad name", "v");
        let err = client.execute(descriptor).await.unwrap_err();
        assert!(matches!(err, RelayError::HeaderParse(_)));
    }

    #[tokio::test]
    async fn unparsable_url_is_rejected_at_dispatch() {
        let client = RelayClient::new();
        let err = client.get("not a url").await.unwrap_err();
        assert!(matches!(err, RelayError::UrlParse(_)));
    }
}
