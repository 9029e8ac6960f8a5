//! Human-readable request/response reconstruction for debug logging.
//!
//! [`Diagnostics`] turns a descriptor about to be dispatched, or a buffered
//! response, into a readable text block emitted through `tracing`. It is
//! read-only: bodies are inspected as borrowed byte slices, never consumed,
//! and inspection never triggers network I/O.
//!
//! # Formatting rules
//!
//! | Body | Output |
//! |------|--------|
//! | none | URL with decoded query parameters |
//! | multipart | small parts (`< 1024` bytes) inlined as query parameters, large parts listed as `files = name=filename` |
//! | plain, text | URL plus the decoded body |
//! | plain, binary | URL plus `(binary N-byte body omitted)` |
//!
//! A body counts as text when none of its first 16 code points (taken from a
//! 64-byte prefix) is a non-whitespace control character; see
//! [`is_plaintext`].
//!
//! # Failure policy
//!
//! Formatting never propagates errors. Anything that goes wrong while
//! composing a block degrades to a fallback line; the caller's success or
//! error path is unaffected. When diagnostics are disabled every entry point
//! returns `None` immediately, without touching the body.

use crate::convert::ResultDecoder;
use crate::error::{RelayError, Result};
use crate::request::{BodyKind, Method, MultipartPart, RequestDescriptor};
use crate::types::RelayResponse;
use percent_encoding::percent_decode_str;
use std::fmt;
use url::Url;

/// Part bodies below this length are inlined into diagnostic output; larger
/// ones are reduced to `name=filename`.
const INLINE_PART_LIMIT: usize = 1024;

/// Client-scoped diagnostic formatter.
///
/// Constructed from the client configuration; there is no process-wide debug
/// flag. Cloning is cheap.
#[derive(Clone)]
pub struct Diagnostics {
    enabled: bool,
    result_decoder: Option<ResultDecoder>,
}

impl Diagnostics {
    /// Create a formatter; `enabled = false` makes every entry point a no-op.
    pub fn new(enabled: bool) -> Self {
        Diagnostics { enabled, result_decoder: None }
    }

    /// A formatter that never produces output.
    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Attach the envelope-unwrapping hook applied to response text.
    pub fn with_result_decoder(mut self, hook: ResultDecoder) -> Self {
        self.result_decoder = Some(hook);
        self
    }

    /// Whether formatting is active.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Compose the request-start block, or `None` when disabled.
    pub fn format_request(&self, descriptor: &RequestDescriptor) -> Option<String> {
        if !self.enabled {
            return None;
        }
        let block = request_block(descriptor)
            .unwrap_or_else(|_| String::from("\n\nrequest log formatting failed"));
        Some(format!(
            "<------------------- request start Method={} ------------------->{}",
            descriptor.method, block
        ))
    }

    /// Emit the request-start block at debug level.
    pub fn log_request(&self, descriptor: &RequestDescriptor) {
        if let Some(text) = self.format_request(descriptor) {
            tracing::debug!("{}", text);
        }
    }

    /// Compose the request-end block for a buffered response, or `None` when
    /// disabled.
    ///
    /// The body is read from the response's already-buffered bytes; the
    /// response handed back to the caller is untouched. Charset comes from
    /// the Content-Type header (default UTF-8); other charsets degrade to a
    /// lossy UTF-8 decode rather than failing the log path.
    pub fn format_response(&self, method: Method, response: &RelayResponse) -> Option<String> {
        if !self.enabled {
            return None;
        }
        let charset = response
            .header("content-type")
            .and_then(charset_of)
            .unwrap_or_else(|| String::from("utf-8"));
        if !charset.eq_ignore_ascii_case("utf-8") {
            tracing::trace!(%charset, "unsupported response charset, decoding as lossy UTF-8");
        }
        let mut text = String::from_utf8_lossy(&response.body).into_owned();
        if let Some(hook) = &self.result_decoder {
            text = hook(text);
        }
        Some(format!(
            "<------------------- request end Method={} Code={} ------------------->\n\n{}\n\n{}{}",
            method,
            response.status,
            decode_for_display(&response.url),
            response.headers,
            text
        ))
    }

    /// Emit the request-end block at debug level.
    pub fn log_response(&self, method: Method, response: &RelayResponse) {
        if let Some(text) = self.format_response(method, response) {
            tracing::debug!("{}", text);
        }
    }

    /// Compose the failure block for a request that produced an error.
    ///
    /// Transport-class failures get the decoded URL appended; converter and
    /// status errors already carry their own request context.
    pub fn format_error(&self, descriptor: &RequestDescriptor, error: &RelayError) -> Option<String> {
        if !self.enabled {
            return None;
        }
        let mut out = error.to_string();
        if error.is_transport() {
            out.push_str("\n\n");
            out.push_str(&decode_for_display(&descriptor.url));
        }
        Some(out)
    }

    /// Emit the failure block at warn level.
    pub fn log_error(&self, descriptor: &RequestDescriptor, error: &RelayError) {
        if let Some(text) = self.format_error(descriptor, error) {
            tracing::warn!("{}", text);
        }
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("enabled", &self.enabled)
            .field("result_decoder", &self.result_decoder.is_some())
            .finish()
    }
}

/// Everything after the frame line: URL/parameter block, body metadata,
/// headers.
fn request_block(descriptor: &RequestDescriptor) -> Result<String> {
    let mut out = String::from("\n\n");
    out.push_str(&url_and_params(descriptor)?);

    let encoded = descriptor.encoded_body()?;
    let has_body = encoded.is_some() || descriptor.body == BodyKind::Multipart;
    if let Some(body) = &encoded {
        out.push_str("\n\nContent-Type: ");
        out.push_str(body.content_type);
        out.push_str(&format!("\nContent-Length: {}", body.bytes.len()));
    } else if descriptor.body == BodyKind::Multipart {
        // Boundary and exact length are chosen by the transport at send time.
        out.push_str("\n\nContent-Type: multipart/form-data");
    }

    out.push_str(if has_body { "\n" } else { "\n\n" });
    out.push_str(&descriptor.headers.to_string());
    Ok(out)
}

/// The URL with its display parameters, plus the body summary for modes that
/// carry one.
fn url_and_params(descriptor: &RequestDescriptor) -> Result<String> {
    let mut url =
        Url::parse(&descriptor.url).map_err(|e| RelayError::UrlParse(e.to_string()))?;

    match descriptor.body {
        BodyKind::Multipart => {
            let files = append_small_parts(&mut url, &descriptor.parts);
            Ok(format!("{}\n\nfiles = {}", decode_for_display(url.as_str()), files))
        }
        BodyKind::Query => {
            if !descriptor.params.is_empty() {
                let mut pairs = url.query_pairs_mut();
                for (key, value) in descriptor.params.to_pairs() {
                    pairs.append_pair(&key, &value);
                }
            }
            Ok(decode_for_display(url.as_str()))
        }
        BodyKind::Form | BodyKind::Json => {
            let base = decode_for_display(url.as_str());
            match descriptor.encoded_body()? {
                Some(body) if !is_plaintext(&body.bytes) => Ok(format!(
                    "{}\n\n(binary {}-byte body omitted)",
                    base,
                    body.bytes.len()
                )),
                Some(body) => Ok(format!("{}\n\n{}", base, String::from_utf8_lossy(&body.bytes))),
                None => Ok(base),
            }
        }
    }
}

/// Inline small part bodies as display query parameters; collect large parts
/// into the `files = name=filename` summary.
fn append_small_parts(url: &mut Url, parts: &[MultipartPart]) -> String {
    let mut files = String::new();
    for part in parts {
        let line = part.content_disposition();
        let Some((name, file_name)) = parse_content_disposition(&line) else {
            continue;
        };
        if part.body.len() < INLINE_PART_LIMIT {
            url.query_pairs_mut()
                .append_pair(&name, &String::from_utf8_lossy(&part.body));
        } else {
            if !files.is_empty() {
                files.push('&');
            }
            files.push_str(&name);
            files.push('=');
            files.push_str(file_name.as_deref().unwrap_or_default());
        }
    }
    files
}

/// Recover `name` and optional `filename` from a Content-Disposition-style
/// value such as `form-data; name="field"; filename="a.txt"`.
///
/// Splits on `;`, then on `=`, stripping one surrounding character from each
/// value (the quotes). The first recovered value is the name, the second the
/// file name. Returns `None` when no name can be recovered.
pub fn parse_content_disposition(line: &str) -> Option<(String, Option<String>)> {
    let mut name = None;
    let mut file_name = None;
    for segment in line.split(';') {
        let segment = segment.trim();
        if segment == "form-data" {
            continue;
        }
        let Some((_, raw)) = segment.split_once('=') else {
            continue;
        };
        if raw.len() < 2 {
            continue;
        }
        let Some(value) = raw.get(1..raw.len() - 1) else {
            continue;
        };
        if name.is_none() {
            name = Some(value.to_string());
        } else {
            file_name = Some(value.to_string());
            break;
        }
    }
    name.map(|n| (n, file_name))
}

/// Plaintext heuristic over the leading bytes of a body.
///
/// Copies the first `min(len, 64)` bytes, scans up to 16 leading code points,
/// and classifies the body as binary when any of them is a control character
/// that is not whitespace. Invalid UTF-8 decodes as U+FFFD, which scans as
/// text.
pub fn is_plaintext(data: &[u8]) -> bool {
    let prefix_len = data.len().min(64);
    let prefix = String::from_utf8_lossy(&data[..prefix_len]);
    for c in prefix.chars().take(16) {
        if c.is_control() && !is_lenient_whitespace(c) {
            return false;
        }
    }
    true
}

/// Whitespace test matching the classification this heuristic was calibrated
/// against: Unicode whitespace plus the U+001C..U+001F separators.
fn is_lenient_whitespace(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\u{1c}'..='\u{1f}')
}

/// `charset` parameter of a Content-Type value, if declared.
pub fn charset_of(content_type: &str) -> Option<String> {
    for segment in content_type.split(';').skip(1) {
        let segment = segment.trim();
        if let Some((key, value)) = segment.split_once('=') {
            if key.trim().eq_ignore_ascii_case("charset") {
                return Some(value.trim().trim_matches('"').to_string());
            }
        }
    }
    None
}

/// Percent-decode a URL for display; malformed sequences fall back to the
/// raw string. `+` decodes to a space, as form-urlencoded query output reads.
fn decode_for_display(url: &str) -> String {
    match percent_decode_str(url).decode_utf8() {
        Ok(decoded) => decoded.replace('+', " "),
        Err(_) => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestDescriptor;
    use bytes::Bytes;

    #[test]
    fn ascii_letters_are_plaintext() {
        let body = vec![b'a'; 100];
        assert!(is_plaintext(&body));
    }

    #[test]
    fn leading_control_byte_is_binary() {
        assert!(!is_plaintext(&[0x01, b'a', b'b']));
    }

    #[test]
    fn whitespace_controls_stay_plaintext() {
        assert!(is_plaintext(b"\n\t  {\"k\": 1}"));
        assert!(is_plaintext(&[0x1c, b'x']));
    }

    #[test]
    fn control_past_the_scan_window_is_ignored() {
        let mut body = vec![b'a'; 16];
        body.push(0x01);
        assert!(is_plaintext(&body));
    }

    #[test]
    fn empty_body_is_plaintext() {
        assert!(is_plaintext(b""));
    }

    #[test]
    fn content_disposition_with_filename() {
        let parsed =
            parse_content_disposition("form-data; name=\"field\"; filename=\"a.txt\"").unwrap();
        assert_eq!(parsed.0, "field");
        assert_eq!(parsed.1.as_deref(), Some("a.txt"));
    }

    #[test]
    fn content_disposition_without_filename() {
        let parsed = parse_content_disposition("form-data; name=\"field\"").unwrap();
        assert_eq!(parsed.0, "field");
        assert!(parsed.1.is_none());
    }

    #[test]
    fn content_disposition_without_name_is_none() {
        assert!(parse_content_disposition("form-data").is_none());
        assert!(parse_content_disposition("").is_none());
    }

    #[test]
    fn charset_extraction() {
        assert_eq!(
            charset_of("application/json; charset=UTF-8").as_deref(),
            Some("UTF-8")
        );
        assert_eq!(
            charset_of("text/html; charset=\"gbk\"").as_deref(),
            Some("gbk")
        );
        assert!(charset_of("application/json").is_none());
    }

    #[test]
    fn disabled_formatter_returns_none() {
        let diagnostics = Diagnostics::disabled();
        let descriptor = RequestDescriptor::get("http://example.com/");
        assert!(diagnostics.format_request(&descriptor).is_none());
    }

    #[test]
    fn query_params_appear_decoded_in_request_block() {
        let diagnostics = Diagnostics::new(true);
        let descriptor = RequestDescriptor::get("http://example.com/search")
            .add("q", "hello world")
            .add_header("Accept", "application/json");
        let text = diagnostics.format_request(&descriptor).unwrap();
        assert!(text.contains("request start Method=GET"));
        assert!(text.contains("q=hello world"));
        assert!(text.contains("Accept: application/json"));
    }

    #[test]
    fn large_part_goes_to_files_summary() {
        let diagnostics = Diagnostics::new(true);
        let descriptor = RequestDescriptor::post("http://example.com/upload")
            .add_part(MultipartPart::file("field", "a.txt", vec![b'x'; 2000]));
        let text = diagnostics.format_request(&descriptor).unwrap();
        assert!(text.contains("files = field=a.txt"));
        assert!(!text.contains(&"x".repeat(2000)));
    }

    #[test]
    fn small_part_is_inlined_as_query_parameter() {
        let diagnostics = Diagnostics::new(true);
        let descriptor = RequestDescriptor::post("http://example.com/upload")
            .add_part(MultipartPart::file("field", "a.txt", Bytes::from_static(b"tiny value")));
        let text = diagnostics.format_request(&descriptor).unwrap();
        assert!(text.contains("field=tiny value"));
        // Nothing spilled into the files summary.
        assert!(text.contains("files = \n"));
    }

    #[test]
    fn disposition_without_recoverable_name_is_skipped() {
        assert!(parse_content_disposition("form-data; garbage").is_none());
        let mut url = Url::parse("http://example.com/").unwrap();
        let parts: [MultipartPart; 0] = [];
        let files = append_small_parts(&mut url, &parts);
        assert!(files.is_empty());
        assert!(url.query().is_none());
    }

    #[test]
    fn form_body_is_inlined_with_metadata() {
        let diagnostics = Diagnostics::new(true);
        let descriptor = RequestDescriptor::post("http://example.com/submit").add("k", "v");
        let text = diagnostics.format_request(&descriptor).unwrap();
        assert!(text.contains("k=v"));
        assert!(text.contains("Content-Type: application/x-www-form-urlencoded"));
        assert!(text.contains("Content-Length: 3"));
    }

    #[test]
    fn unparsable_url_degrades_to_fallback_line() {
        let diagnostics = Diagnostics::new(true);
        let descriptor = RequestDescriptor::get("not a url");
        let text = diagnostics.format_request(&descriptor).unwrap();
        assert!(text.contains("request log formatting failed"));
    }

    #[test]
    fn error_block_appends_url_for_transport_failures() {
        let diagnostics = Diagnostics::new(true);
        let descriptor = RequestDescriptor::get("http://example.com/a%20b");
        let text = diagnostics
            .format_error(&descriptor, &RelayError::Http("connection refused".into()))
            .unwrap();
        assert!(text.contains("connection refused"));
        assert!(text.contains("http://example.com/a b"));

        let status = RelayError::Status { code: 500, url: "http://example.com/".into() };
        let text = diagnostics.format_error(&descriptor, &status).unwrap();
        assert!(!text.contains("a b"));
    }
}
