//! Shallow merge of JSON object mappings.
//!
//! Relies on `serde_json`'s `preserve_order` feature: the result lists base
//! keys first, in base order, followed by keys that only the override has.

use serde_json::{Map, Value};

/// Returns `base` with `overrides` applied on top. Override values win on
/// key collision; neither input is modified.
pub fn merge(base: &Map<String, Value>, overrides: Option<&Map<String, Value>>) -> Map<String, Value> {
    let mut merged = base.clone();
    if let Some(overrides) = overrides {
        for (key, value) in overrides {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}
