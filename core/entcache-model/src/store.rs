//! Immutable per-type entity store.
//!
//! A store is never modified in place. [`EntityStore::merge_slice`] builds a
//! successor that shares every untouched record with its predecessor, and
//! reports "no change" by returning `None` so callers can keep handing out
//! the same reference.

use entcache_types::{EntityKey, EntityRecord, StoreSlice};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::sync::Arc;

/// The complete known set of entities of one type, keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityStore {
    records: BTreeMap<EntityKey, Arc<EntityRecord>>,
}

impl EntityStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding exactly the records of `slice`.
    pub fn from_slice(slice: StoreSlice) -> Self {
        slice.into_iter().collect()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&EntityRecord>
    where
        EntityKey: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.records.get(key).map(Arc::as_ref)
    }

    /// Returns the shared handle of a record, for identity comparisons.
    pub fn get_shared<Q>(&self, key: &Q) -> Option<&Arc<EntityRecord>>
    where
        EntityKey: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.records.get(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        EntityKey: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.records.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &EntityKey> {
        self.records.keys()
    }

    /// Iterates over `(key, record)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&EntityKey, &EntityRecord)> {
        self.records.iter().map(|(k, r)| (k, r.as_ref()))
    }

    /// Merges `slice` into a successor store.
    ///
    /// Each incoming record is combined with the stored one through `merge`;
    /// keys absent from the store are inserted as-is and keys absent from the
    /// slice are untouched. Returns `None` when no record would change.
    pub fn merge_slice<F>(&self, slice: &StoreSlice, mut merge: F) -> Option<Self>
    where
        F: FnMut(&EntityRecord, &EntityRecord) -> EntityRecord,
    {
        let mut next: Option<BTreeMap<EntityKey, Arc<EntityRecord>>> = None;

        for (key, incoming) in slice {
            let merged = match self.records.get(key) {
                Some(existing) => {
                    let merged = merge(&**existing, incoming);
                    if merged == **existing {
                        continue;
                    }
                    merged
                }
                None => incoming.clone(),
            };
            next.get_or_insert_with(|| self.records.clone())
                .insert(key.clone(), Arc::new(merged));
        }

        next.map(|records| Self { records })
    }

    /// Converts the store into a plain JSON object (`identifier -> record`).
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.records
                .iter()
                .map(|(k, r)| (k.to_string(), r.to_value()))
                .collect(),
        )
    }
}

impl FromIterator<(EntityKey, EntityRecord)> for EntityStore {
    fn from_iter<I: IntoIterator<Item = (EntityKey, EntityRecord)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().map(|(k, r)| (k, Arc::new(r))).collect(),
        }
    }
}
