//! The normalized entity cache for one entity type.

use crate::{CacheError, CacheResult, Reducer};
use entcache_model::{EntityHandler, EntitySchema, EntityStore};
use entcache_types::{Action, StoreSlice};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Keeps one entity type's store up to date from fetch actions.
#[derive(Clone)]
pub struct EntityCache {
    schema: EntitySchema,
    initial: Arc<EntityStore>,
    handler: Option<Arc<dyn EntityHandler>>,
}

impl EntityCache {
    /// Creates a cache for `schema.entity_type` starting from an empty store.
    pub fn new(schema: EntitySchema) -> Self {
        Self {
            schema,
            initial: Arc::new(EntityStore::new()),
            handler: None,
        }
    }

    /// Sets the store the cache starts out with.
    #[must_use]
    pub fn with_initial(mut self, initial: EntityStore) -> Self {
        self.initial = Arc::new(initial);
        self
    }

    /// Attaches validation and custom-merge hooks.
    #[must_use]
    pub fn with_handler(mut self, handler: Arc<dyn EntityHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Folds `action` into `current`.
    ///
    /// Only a fetch-succeeded action that carries a slice for this entity
    /// type can produce a new store; every other case returns `current`.
    pub fn apply(&self, current: &Arc<EntityStore>, action: &Action) -> CacheResult<Arc<EntityStore>> {
        let Action::FetchSucceeded { payload } = action else {
            trace!(entity_type = %self.schema.entity_type, kind = %action.kind(), "ignoring action");
            return Ok(Arc::clone(current));
        };

        let Some(slice) = payload.slice(&self.schema.entity_type) else {
            trace!(entity_type = %self.schema.entity_type, "payload has no slice for this type");
            return Ok(Arc::clone(current));
        };

        self.validate(slice)?;

        let strategy = self.schema.merge_strategy;
        let handler = self.handler.as_deref();
        match current.merge_slice(slice, |old, new| strategy.merge(old, new, handler)) {
            Some(next) => {
                debug!(
                    entity_type = %self.schema.entity_type,
                    incoming = slice.len(),
                    before = current.len(),
                    after = next.len(),
                    "merged slice"
                );
                Ok(Arc::new(next))
            }
            None => {
                debug!(entity_type = %self.schema.entity_type, incoming = slice.len(), "slice changed nothing");
                Ok(Arc::clone(current))
            }
        }
    }

    /// Checks every record of the slice before any of it is merged.
    fn validate(&self, slice: &StoreSlice) -> CacheResult<()> {
        let entity_type = &self.schema.entity_type;

        for (key, record) in slice {
            self.schema
                .check_identity(key, record)
                .map_err(|reason| CacheError::validation(entity_type, key, reason))?;

            if let Some(handler) = &self.handler {
                handler
                    .validate(key, record)
                    .map_err(|reason| CacheError::validation(entity_type, key, reason))?;
            }
        }
        Ok(())
    }
}

impl Reducer for EntityCache {
    fn entity_type(&self) -> &str {
        &self.schema.entity_type
    }

    fn initial_state(&self) -> Arc<EntityStore> {
        Arc::clone(&self.initial)
    }

    fn apply(&self, current: &Arc<EntityStore>, action: &Action) -> CacheResult<Arc<EntityStore>> {
        EntityCache::apply(self, current, action)
    }
}

impl fmt::Debug for EntityCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityCache")
            .field("schema", &self.schema)
            .field("initial_len", &self.initial.len())
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}
