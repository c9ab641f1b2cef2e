//! Override merge of two JSON documents.
//!
//! Objects merge key by key; any other value in the overlay (strings,
//! numbers, lists, null) replaces the base value wholesale. Lists are never
//! concatenated.

use serde_json::Value;

/// Merge `overlay` into `base` in place.
pub fn merge_json(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(base_value) => merge_json(base_value, overlay_value),
                    None => {
                        base_map.insert(key.clone(), overlay_value.clone());
                    }
                }
            }
        }
        (base, overlay) => *base = overlay.clone(),
    }
}
