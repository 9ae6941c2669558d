//! Shared JSON serializer

use crate::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// JSON serializer shared by tasks on a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonMapper {
    pretty: bool,
}

impl JsonMapper {
    /// Compact output
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: false }
    }

    /// Indented output, for files operators read
    #[must_use]
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Serialize `value` to bytes
    pub fn to_vec<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        };
        bytes.map_err(|e| Error::serialization(format!("Failed to serialize value: {e}")))
    }

    /// Serialize `value` to a JSON tree
    pub fn to_value<T: Serialize + ?Sized>(&self, value: &T) -> Result<serde_json::Value> {
        serde_json::to_value(value)
            .map_err(|e| Error::serialization(format!("Failed to encode value: {e}")))
    }

    /// Deserialize a value from bytes
    pub fn from_slice<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes)
            .map_err(|e| Error::serialization(format!("Failed to parse value: {e}")))
    }

    /// Deserialize a value from a JSON tree
    pub fn from_value<T: DeserializeOwned>(&self, value: serde_json::Value) -> Result<T> {
        serde_json::from_value(value)
            .map_err(|e| Error::serialization(format!("Failed to decode value: {e}")))
    }
}
