//! Recursive structural merge for settings documents.

use serde_json::Value;

use crate::model::SettingsDocument;

/// Deep-merge `incoming` into a copy of `existing`.
///
/// For every key in `incoming`:
/// - absent from `existing`: copied in as-is;
/// - both sides are nested documents: merged recursively;
/// - anything else: the incoming value replaces the existing one outright.
///   Sequences are never concatenated.
///
/// Keys only present in `existing` are kept, in their original position.
/// Neither input is modified.
pub fn merge_settings(existing: &SettingsDocument, incoming: &SettingsDocument) -> SettingsDocument {
    let mut merged = existing.clone();

    for (key, value) in incoming {
        let next = match (merged.get(key), value) {
            (Some(Value::Object(current)), Value::Object(overlay)) => {
                Value::Object(merge_settings(current, overlay))
            }
            _ => value.clone(),
        };
        // Map::insert keeps the slot of an existing key.
        merged.insert(key.clone(), next);
    }

    merged
}
