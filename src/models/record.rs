//! Row identity and field access.
//!
//! Rows are opaque to the list core. The only things it needs from a row are
//! a stable identity (for selection and edit/delete) and dot-path field
//! lookup (for cell display and in-memory filtering).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable identity of a row, taken from `_id` or `id`.
///
/// Numeric ids are normalized to their decimal string form so that `7` and
/// `"7"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build an id from a JSON scalar. Objects, arrays, null and empty
    /// strings carry no identity.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Resolve a dot-separated path (`owner.address.city`) inside a JSON value.
///
/// Numeric segments index into arrays (`items.0.name`).
pub fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Identity lookup on a JSON object: `_id` wins over `id`.
pub fn identity_of(value: &Value) -> Option<RecordId> {
    value
        .get("_id")
        .and_then(RecordId::from_value)
        .or_else(|| value.get("id").and_then(RecordId::from_value))
}

/// A row shown in a list.
///
/// The default methods go through `serde_json::to_value`, so any serializable
/// struct with an `_id` or `id` field works without extra code. Implement
/// `record_id` by hand for hot paths.
pub trait Record: Clone + Send + Sync + Serialize + 'static {
    /// The row's identity, if it has one.
    fn record_id(&self) -> Option<RecordId> {
        serde_json::to_value(self).ok().as_ref().and_then(identity_of)
    }

    /// Nested field lookup by dot path.
    fn field(&self, path: &str) -> Option<Value> {
        let value = serde_json::to_value(self).ok()?;
        lookup_path(&value, path).cloned()
    }
}

impl Record for Value {
    fn record_id(&self) -> Option<RecordId> {
        identity_of(self)
    }

    fn field(&self, path: &str) -> Option<Value> {
        lookup_path(self, path).cloned()
    }
}

/// Render a JSON scalar for display in a cell.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => if *b { "Yes" } else { "No" }.to_string(),
        other => other.to_string(),
    }
}
