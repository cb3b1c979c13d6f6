//! Deduplicating append merge for keybinding lists.

use std::collections::HashSet;

use crate::model::{BindingRecord, IdentityKey, KeybindingList};

/// Append the bindings from `incoming` that `existing` does not already have.
///
/// Duplicates are detected by [`IdentityKey`] (chord + command). The first
/// record seen for a key wins: existing records always beat incoming ones, and
/// an earlier incoming record beats a later one. A dropped record is dropped
/// whole; its `when` clause or arguments are not folded into the survivor.
///
/// The result lists every existing record in its original order (including
/// any duplicates already present there), followed by the admitted incoming
/// records in their original relative order.
pub fn merge_keybindings(existing: &[BindingRecord], incoming: &[BindingRecord]) -> KeybindingList {
    let mut seen: HashSet<IdentityKey> = existing.iter().map(BindingRecord::identity).collect();
    let mut merged = existing.to_vec();

    for binding in incoming {
        if seen.insert(binding.identity()) {
            merged.push(binding.clone());
        }
    }

    merged
}
