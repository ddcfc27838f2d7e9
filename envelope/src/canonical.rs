//! JSON payload serialization.
//!
//! Encryption payloads use plain compact JSON: whatever `serde_json` emits
//! for the value is what gets sealed, and the decrypting side parses it back.
//! Byte-for-byte stability does not matter there.
//!
//! Signatures are different. The verifier rebuilds the message from the value
//! and must land on exactly the bytes the signer signed. Signing therefore
//! goes through [`to_canonical_json`], which sorts object keys at every depth
//! and emits no whitespace. A struct and a map with the same fields in a
//! different order sign identically. Verifiers outside Rust must produce
//! sorted-key compact JSON to interoperate.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

/// Serialize a payload to compact JSON bytes.
pub fn to_json_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(value)
}

/// Parse JSON bytes back into a payload.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Serialize a value to canonical JSON: sorted keys, no whitespace.
///
/// # Examples
///
/// ```
/// use nacl_envelope::canonical::to_canonical_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Transfer {
///     to: String,
///     amount: u32,
/// }
///
/// let json = to_canonical_json(&Transfer { to: "bob".into(), amount: 5 }).unwrap();
/// assert_eq!(json, br#"{"amount":5,"to":"bob"}"#);
/// ```
pub fn to_canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let value = serde_json::to_value(value)?;
    serde_json::to_vec(&canonicalize(value))
}

// Rebuilding the map from a sorted iterator keeps the order even when some
// other crate in the build enables serde_json's `preserve_order`.
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, canonicalize(value)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Serialize)]
    struct Forward {
        a: u8,
        b: u8,
    }

    #[derive(Serialize)]
    struct Backward {
        b: u8,
        a: u8,
    }

    #[test]
    fn test_field_order_does_not_matter() {
        let forward = to_canonical_json(&Forward { a: 1, b: 2 }).unwrap();
        let backward = to_canonical_json(&Backward { b: 2, a: 1 }).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward, br#"{"a":1,"b":2}"#);
    }

    #[test]
    fn test_nested_objects_are_sorted() {
        let value = json!({"z": [{"y": 1, "x": 2}], "m": {"c": true, "a": null}});
        let json = to_canonical_json(&value).unwrap();
        assert_eq!(
            String::from_utf8(json).unwrap(),
            r#"{"m":{"a":null,"c":true},"z":[{"x":2,"y":1}]}"#
        );
    }

    #[test]
    fn test_hash_map_is_stable() {
        let mut map = HashMap::new();
        for key in ["delta", "alpha", "charlie", "bravo"] {
            map.insert(key.to_string(), key.len());
        }
        let json = to_canonical_json(&map).unwrap();
        assert_eq!(json, br#"{"alpha":5,"bravo":5,"charlie":7,"delta":5}"#);
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(to_canonical_json("hello").unwrap(), br#""hello""#);
        assert_eq!(to_canonical_json(&42u64).unwrap(), b"42");
    }

    #[test]
    fn test_non_string_keys_fail() {
        let mut map = HashMap::new();
        map.insert(vec![1u8], 1u8);
        assert!(to_canonical_json(&map).is_err());
        assert!(to_json_bytes(&map).is_err());
    }

    #[test]
    fn test_payload_roundtrip() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Note {
            title: String,
            tags: Vec<String>,
        }

        let note = Note {
            title: "groceries".into(),
            tags: vec!["home".into()],
        };
        let bytes = to_json_bytes(&note).unwrap();
        let back: Note = from_json_bytes(&bytes).unwrap();
        assert_eq!(back, note);
    }
}
