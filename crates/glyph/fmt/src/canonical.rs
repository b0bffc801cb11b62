//! Canonical serialization of metadata values.
//!
//! The canonical form is compact JSON with every object's keys sorted
//! lexicographically by their UTF-8 bytes. Array order is preserved. Two
//! structurally equal values always produce the same bytes, which is what the
//! commit hash is computed over.

use serde_json::{Map, Value};

/// Returns a copy of `value` with all object keys sorted, recursively.
///
/// Key order is produced explicitly rather than relying on the map type, so
/// the result is the same whether or not `serde_json` preserves insertion
/// order.
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

            let mut sorted = Map::with_capacity(entries.len());
            for (k, v) in entries {
                sorted.insert(k.clone(), canonicalize(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// Serializes `value` in canonical form.
pub fn to_canonical_bytes(value: &Value) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&canonicalize(value))
}
