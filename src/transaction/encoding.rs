//! Canonical byte encoding shared by signing, validation and hashing.
//!
//! Values are encoded as compact JSON. Field order follows the struct
//! declaration order, byte payloads are `0x` prefixed lowercase hex, so the
//! same value always yields the same bytes.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, TxError};

/// Encodes `value` canonically. `context` names the operation for errors.
pub(crate) fn to_canonical_bytes<T: Serialize>(
    value: &T,
    context: impl FnOnce() -> String,
) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|source| TxError::EncodingFailure {
        context: context(),
        source,
    })
}

/// Decodes a canonically encoded value.
pub(crate) fn from_canonical_bytes<T: DeserializeOwned>(bytes: &[u8], context: &str) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|source| TxError::EncodingFailure {
        context: context.to_owned(),
        source,
    })
}

/// Serde adapter rendering `Vec<u8>` as a `0x` prefixed hex string.
pub(crate) mod hex_bytes {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        let digits = text
            .strip_prefix("0x")
            .ok_or_else(|| D::Error::custom("hex bytes must start with 0x"))?;
        hex::decode(digits).map_err(D::Error::custom)
    }
}
