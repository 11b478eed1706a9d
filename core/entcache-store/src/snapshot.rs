use entcache_model::EntityStore;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Every registered entity type's store at one point in time.
///
/// Snapshots are immutable. `revision` counts the dispatches that changed
/// at least one store since the initial snapshot (revision 0).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    revision: u64,
    stores: BTreeMap<String, Arc<EntityStore>>,
}

impl Snapshot {
    pub(crate) fn new(revision: u64, stores: BTreeMap<String, Arc<EntityStore>>) -> Self {
        Self { revision, stores }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the store of `entity_type`.
    pub fn store(&self, entity_type: &str) -> Option<&Arc<EntityStore>> {
        self.stores.get(entity_type)
    }

    pub fn entity_types(&self) -> impl Iterator<Item = &str> {
        self.stores.keys().map(String::as_str)
    }

    pub(crate) fn stores(&self) -> &BTreeMap<String, Arc<EntityStore>> {
        &self.stores
    }

    /// Plain JSON rendering: `type -> identifier -> record`.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.stores
                .iter()
                .map(|(t, s)| (t.clone(), s.to_value()))
                .collect(),
        )
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.stores.serialize(serializer)
    }
}
