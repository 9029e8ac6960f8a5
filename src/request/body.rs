//! Body modes and multipart parts.
//!
//! A descriptor's parameters turn into the wire body according to its
//! [`BodyKind`]; multipart uploads carry their parts separately as
//! [`MultipartPart`] values so both the dispatcher and the diagnostic
//! formatter can walk them without re-parsing an encoded body.

use bytes::Bytes;

/// How accumulated parameters become the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Parameters are appended to the URL query string; no body is sent.
    Query,
    /// Parameters are sent as an `application/x-www-form-urlencoded` body.
    Form,
    /// Parameters are sent as a JSON object body.
    Json,
    /// The body is assembled from [`MultipartPart`]s as `multipart/form-data`.
    Multipart,
}

/// One part of a multipart upload.
///
/// Parts hold their content fully in memory as [`Bytes`]; the diagnostic
/// formatter inspects them read-only, so the bytes handed to the transport
/// are never consumed by logging.
#[derive(Debug, Clone)]
pub struct MultipartPart {
    /// Form field name.
    pub name: String,
    /// File name, for file parts.
    pub file_name: Option<String>,
    /// Declared content type of the part, if any.
    pub content_type: Option<String>,
    /// Part content.
    pub body: Bytes,
}

impl MultipartPart {
    /// A plain form field part.
    pub fn field(name: impl Into<String>, body: impl Into<Bytes>) -> Self {
        MultipartPart {
            name: name.into(),
            file_name: None,
            content_type: None,
            body: body.into(),
        }
    }

    /// A file part with a file name.
    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        body: impl Into<Bytes>,
    ) -> Self {
        MultipartPart {
            name: name.into(),
            file_name: Some(file_name.into()),
            content_type: None,
            body: body.into(),
        }
    }

    /// Set the part's content type.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// The part's `Content-Disposition` value as it appears on the wire,
    /// e.g. `form-data; name="avatar"; filename="a.png"`.
    pub fn content_disposition(&self) -> String {
        match &self.file_name {
            Some(file_name) => {
                format!("form-data; name=\"{}\"; filename=\"{}\"", self.name, file_name)
            }
            None => format!("form-data; name=\"{}\"", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_part_disposition() {
        let part = MultipartPart::field("comment", "hello");
        assert_eq!(part.content_disposition(), "form-data; name=\"comment\"");
        assert!(part.file_name.is_none());
    }

    #[test]
    fn file_part_disposition() {
        let part = MultipartPart::file("avatar", "a.png", vec![0u8; 16]);
        assert_eq!(
            part.content_disposition(),
            "form-data; name=\"avatar\"; filename=\"a.png\""
        );
    }

    #[test]
    fn content_type_is_chainable() {
        let part = MultipartPart::file("doc", "d.pdf", vec![1u8]).content_type("application/pdf");
        assert_eq!(part.content_type.as_deref(), Some("application/pdf"));
    }
}
