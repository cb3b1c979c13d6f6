//! Keybinding records and their identity keys.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered list of keybindings (`keybindings.json`).
///
/// Order matters: the editor scans top to bottom for the first matching chord.
pub type KeybindingList = Vec<BindingRecord>;

/// One keybinding entry.
///
/// Held as the raw JSON object so that `when`, `args` and any other fields
/// survive a rewrite unchanged, in their original order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingRecord(Map<String, Value>);

impl BindingRecord {
    /// Build a record from a chord and a command with no extra fields.
    pub fn new(key: impl Into<String>, command: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("key".to_string(), Value::String(key.into()));
        fields.insert("command".to_string(), Value::String(command.into()));
        Self(fields)
    }

    /// Add or replace an extra field such as `when` or `args`.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// The chord, if present and a string.
    pub fn key(&self) -> Option<&str> {
        self.0.get("key").and_then(Value::as_str)
    }

    /// The command, if present and a string.
    pub fn command(&self) -> Option<&str> {
        self.0.get("command").and_then(Value::as_str)
    }

    /// All fields of the record.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The (key, command) pair used for duplicate detection.
    pub fn identity(&self) -> IdentityKey {
        IdentityKey {
            key: identity_component(self.0.get("key")),
            command: identity_component(self.0.get("command")),
        }
    }
}

impl From<Map<String, Value>> for BindingRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Duplicate-detection key of a [`BindingRecord`]: its (key, command) pair.
///
/// Missing and `null` fields both count as absent, so two records that both
/// lack a command but share a chord are duplicates. Non-string values compare
/// by their JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    key: Option<Component>,
    command: Option<Component>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Component {
    Text(String),
    Json(String),
}

fn identity_component(value: Option<&Value>) -> Option<Component> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(Component::Text(s.clone())),
        other => Some(Component::Json(other.to_string())),
    }
}
