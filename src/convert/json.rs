//! JSON converter over `serde_json`.

use crate::convert::{Converter, EncodedBody, MEDIA_TYPE_JSON};
use crate::error::{RelayError, Result};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// [`Converter`] implementation producing and consuming JSON.
///
/// Decoding an empty payload, or a payload whose structural value is absent
/// for the target type, fails with [`RelayError::Decode`] naming the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonConverter;

impl Converter for JsonConverter {
    fn encode<T: Serialize>(&self, value: &T) -> Result<EncodedBody> {
        let bytes = serde_json::to_vec(value).map_err(|e| RelayError::Encode(e.to_string()))?;
        Ok(EncodedBody {
            content_type: MEDIA_TYPE_JSON,
            bytes: Bytes::from(bytes),
        })
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        if bytes.is_empty() {
            return Err(RelayError::Decode {
                target: std::any::type_name::<T>(),
                reason: "empty response body".into(),
            });
        }
        serde_json::from_slice(bytes).map_err(|e| RelayError::Decode {
            target: std::any::type_name::<T>(),
            reason: e.to_string(),
        })
    }
}
