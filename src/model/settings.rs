//! Settings document type.

use serde_json::{Map, Value};

/// Nested key-value editor settings (`settings.json`).
///
/// Values are scalars, sequences, or further nested documents. Backed by a
/// `serde_json` map built with `preserve_order`, so a rewritten file keeps the
/// user's key layout. Equality ignores key order.
pub type SettingsDocument = Map<String, Value>;
