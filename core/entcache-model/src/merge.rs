//! Record merge functions.
//!
//! Both functions are pure: they read their inputs and build a new record.

use entcache_types::EntityRecord;
use serde_json::{Map, Value};

/// One-level merge: fields of `incoming` win, fields only in `existing`
/// are kept.
pub fn shallow_merge(existing: &EntityRecord, incoming: &EntityRecord) -> EntityRecord {
    let mut fields = existing.as_map().clone();
    for (field, value) in incoming.fields() {
        fields.insert(field.clone(), value.clone());
    }
    EntityRecord::from_map(fields)
}

/// Recursive merge: where both sides hold an object under the same field
/// the objects are merged, otherwise the incoming value wins.
pub fn deep_merge(existing: &EntityRecord, incoming: &EntityRecord) -> EntityRecord {
    EntityRecord::from_map(merge_maps(existing.as_map(), incoming.as_map()))
}

fn merge_maps(existing: &Map<String, Value>, incoming: &Map<String, Value>) -> Map<String, Value> {
    let mut out = existing.clone();
    for (field, value) in incoming {
        let merged = match (out.get(field), value) {
            (Some(Value::Object(old)), Value::Object(new)) => Value::Object(merge_maps(old, new)),
            _ => value.clone(),
        };
        out.insert(field.clone(), merged);
    }
    out
}

impl crate::MergeStrategy {
    /// Combines `existing` and `incoming` according to this strategy.
    pub fn merge(
        self,
        existing: &EntityRecord,
        incoming: &EntityRecord,
        handler: Option<&dyn crate::EntityHandler>,
    ) -> EntityRecord {
        match (self, handler) {
            (Self::Shallow, _) | (Self::Custom, None) => shallow_merge(existing, incoming),
            (Self::Replace, _) => incoming.clone(),
            (Self::Deep, _) => deep_merge(existing, incoming),
            (Self::Custom, Some(handler)) => handler.merge(existing, incoming),
        }
    }
}
