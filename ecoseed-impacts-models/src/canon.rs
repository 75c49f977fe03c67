use serde::Serialize;
use serde_json::Value;
use sha2::{Digest as ShaDigest, Sha256};
use std::collections::BTreeMap;

use crate::errors::{ModelError, Result};

/// JSON bytes of `value` with every object's keys sorted, independent of
/// how the value orders its own fields or entries.
pub fn canonical_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let tree = serde_json::to_value(value).map_err(|err| ModelError::Digest(err.to_string()))?;
    serde_json::to_vec(&sorted(tree)).map_err(|err| ModelError::Digest(err.to_string()))
}

/// `sha256:<hex>|blake3:<hex>` over [`canonical_bytes`].
pub fn compute_digest<T: Serialize>(value: &T) -> Result<String> {
    let bytes = canonical_bytes(value)?;
    Ok(format!(
        "sha256:{}|blake3:{}",
        hex::encode(Sha256::digest(&bytes)),
        blake3::hash(&bytes).to_hex()
    ))
}

fn sorted(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let entries: BTreeMap<String, Value> =
                map.into_iter().map(|(key, inner)| (key, sorted(inner))).collect();
            Value::Object(entries.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sorted).collect()),
        other => other,
    }
}
