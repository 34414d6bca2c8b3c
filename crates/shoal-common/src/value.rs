//! Base64 transport encoding for KV value bytes.
//!
//! The registry carries key values as base64 strings in JSON (and emits
//! `null` for keys written with no value at all).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn decode(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(input)
}

/// Serde `with`-module for byte fields that travel base64-encoded.
pub mod base64_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        // A null value decodes to empty bytes.
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(Vec::new()),
            Some(s) => super::decode(&s).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let bytes = b"registry value";
        assert_eq!(decode(&encode(bytes)).unwrap(), bytes);
    }

    #[test]
    fn decode_rejects_invalid_input() {
        assert!(decode("not base64!").is_err());
    }

    #[test]
    fn empty_bytes_encode_to_empty_string() {
        assert_eq!(encode(b""), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }
}
