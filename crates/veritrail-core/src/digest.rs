//! Canonical digest computation
//!
//! Provides deterministic SHA256 digests over raw bytes and over
//! structured JSON values. Structured values are serialized with
//! recursively sorted object keys so that identical logical content
//! always hashes identically, regardless of how the value was built.
//!
//! ## Determinism Guarantees
//!
//! - Same logical value → same digest (canonical key ordering)
//! - Array order is preserved (arrays are ordered by definition)
//! - Digests are 64-character lowercase hex strings

use crate::errors::{serialization_error, Result};
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Hash raw bytes with SHA256.
///
/// Returns the hex-encoded digest (64 characters).
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Serialize a JSON value canonically.
///
/// Object keys are sorted lexicographically at every nesting level.
/// No insignificant whitespace is emitted.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

/// Compute the canonical SHA256 digest of a JSON value.
pub fn digest_value(value: &Value) -> String {
    sha256_hex(canonical_json(value).as_bytes())
}

/// Convert any serializable record to a JSON value, surfacing
/// non-canonicalizable payloads (non-string map keys, non-finite floats)
/// as `VeritrailError::Serialization`.
pub fn to_canonical_value<T: Serialize>(context: &str, record: &T) -> Result<Value> {
    serde_json::to_value(record).map_err(|e| serialization_error(context, e))
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        // serde_json handles escaping; a String value cannot fail to serialize
        Value::String(s) => out.push_str(&serde_json::to_string(s).unwrap_or_default()),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            // Re-sort explicitly; do not rely on the map's backing order
            let sorted: BTreeMap<&String, &Value> = map.iter().collect();
            out.push('{');
            for (i, (key, item)) in sorted.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&serde_json::to_string(key).unwrap_or_default());
                out.push(':');
                write_canonical(item, out);
            }
            out.push('}');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sha256_hex_length() {
        assert_eq!(sha256_hex(b"hello").len(), 64);
    }

    #[test]
    fn test_canonical_json_sorts_keys() {
        let value = json!({"b": 2, "a": 1, "nested": {"z": true, "y": null}});
        assert_eq!(
            canonical_json(&value),
            r#"{"a":1,"b":2,"nested":{"y":null,"z":true}}"#
        );
    }

    #[test]
    fn test_canonical_json_preserves_array_order() {
        let value = json!(["c", "a", "b"]);
        assert_eq!(canonical_json(&value), r#"["c","a","b"]"#);
    }

    #[test]
    fn test_digest_independent_of_insertion_order() {
        let v1 = json!({"x": 1, "y": [1, 2]});
        let mut map = serde_json::Map::new();
        map.insert("y".into(), json!([1, 2]));
        map.insert("x".into(), json!(1));
        let v2 = Value::Object(map);
        assert_eq!(digest_value(&v1), digest_value(&v2));
    }

    #[test]
    fn test_string_escaping() {
        let value = json!({"msg": "line\n\"quoted\""});
        assert_eq!(canonical_json(&value), r#"{"msg":"line\n\"quoted\""}"#);
    }
}
