//! Entity identifiers.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of one entity within its type's store.
///
/// Payload keys arrive as JSON object keys and are therefore strings.
/// Numeric identifiers are normalized to their decimal rendering, so
/// `EntityKey::from(7u64)` and `EntityKey::from("7")` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityKey(String);

impl EntityKey {
    /// Creates a key from anything string-like.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `value` identifies this key.
    ///
    /// Strings compare verbatim; integers compare by decimal rendering.
    /// Any other JSON value never matches.
    #[must_use]
    pub fn matches_value(&self, value: &serde_json::Value) -> bool {
        match value {
            serde_json::Value::String(s) => s == &self.0,
            serde_json::Value::Number(n) if n.is_i64() || n.is_u64() => n.to_string() == self.0,
            _ => false,
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for EntityKey {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl From<i64> for EntityKey {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl Borrow<str> for EntityKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}
