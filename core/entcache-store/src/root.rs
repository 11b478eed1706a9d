//! Root reducer: fans one action out to every per-type reducer.

use crate::{CacheConfig, Snapshot, StoreError, StoreResult};
use entcache_reducer::Reducer;
use entcache_types::Action;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// The set of registered reducers, one per entity type.
pub struct RootReducer {
    reducers: Vec<Box<dyn Reducer>>,
}

impl RootReducer {
    pub fn builder() -> RootReducerBuilder {
        RootReducerBuilder::default()
    }

    /// Registers one `EntityCache` per configured schema.
    pub fn from_config(config: &CacheConfig) -> StoreResult<Self> {
        config
            .caches()?
            .into_iter()
            .fold(Self::builder(), |builder, cache| builder.register(cache))
            .build()
    }

    /// Names of the registered entity types, in registration order.
    pub fn entity_types(&self) -> impl Iterator<Item = &str> {
        self.reducers.iter().map(|r| r.entity_type())
    }

    /// Snapshot holding every reducer's initial store, at revision 0.
    pub fn initial_snapshot(&self) -> Snapshot {
        let stores = self
            .reducers
            .iter()
            .map(|r| (r.entity_type().to_string(), r.initial_state()))
            .collect();
        Snapshot::new(0, stores)
    }

    /// Computes the snapshot that follows `current` under `action`.
    ///
    /// Every reducer sees its own prior store. If none of them changed,
    /// `current` itself is returned. If any reducer fails the whole action
    /// fails and no snapshot is produced.
    pub fn reduce(&self, current: &Arc<Snapshot>, action: &Action) -> StoreResult<Arc<Snapshot>> {
        let mut changed: Option<BTreeMap<_, _>> = None;

        for reducer in &self.reducers {
            let entity_type = reducer.entity_type();
            let prior = match current.store(entity_type) {
                Some(store) => Arc::clone(store),
                None => reducer.initial_state(),
            };

            let next = reducer.apply(&prior, action)?;
            let missing = current.store(entity_type).is_none();
            if missing || !Arc::ptr_eq(&prior, &next) {
                trace!(entity_type, "store changed");
                changed
                    .get_or_insert_with(|| current.stores().clone())
                    .insert(entity_type.to_string(), next);
            }
        }

        match changed {
            Some(stores) => {
                let revision = current.revision() + 1;
                debug!(kind = %action.kind(), revision, "snapshot advanced");
                Ok(Arc::new(Snapshot::new(revision, stores)))
            }
            None => Ok(Arc::clone(current)),
        }
    }
}

impl fmt::Debug for RootReducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootReducer")
            .field("entity_types", &self.entity_types().collect::<Vec<_>>())
            .finish()
    }
}

/// Collects reducers; duplicate or empty entity types are rejected by
/// [`RootReducerBuilder::build`].
#[derive(Default)]
pub struct RootReducerBuilder {
    reducers: Vec<Box<dyn Reducer>>,
}

impl RootReducerBuilder {
    #[must_use]
    pub fn register(mut self, reducer: impl Reducer + 'static) -> Self {
        self.reducers.push(Box::new(reducer));
        self
    }

    pub fn build(self) -> StoreResult<RootReducer> {
        let mut seen = HashSet::new();
        for reducer in &self.reducers {
            let entity_type = reducer.entity_type();
            if entity_type.is_empty() {
                return Err(StoreError::InvalidConfig("entity type name is empty".into()));
            }
            if !seen.insert(entity_type) {
                return Err(StoreError::DuplicateEntityType(entity_type.to_string()));
            }
        }
        Ok(RootReducer {
            reducers: self.reducers,
        })
    }
}
