//! Cache configuration.
//!
//! A config file is JSON:
//!
//! ```json
//! {
//!   "entity_types": [
//!     { "entity_type": "Transaction", "merge_strategy": "shallow", "id_field": "id" },
//!     { "entity_type": "CardTransaction" }
//!   ],
//!   "initial_state": { "Transaction": { "1": { "id": "1", "amount": 10 } } }
//! }
//! ```

use crate::{StoreError, StoreResult};
use entcache_model::{EntitySchema, EntityStore};
use entcache_reducer::EntityCache;
use entcache_types::RootPayload;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Registered entity types and the records they start with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    pub entity_types: Vec<EntitySchema>,
    /// Seed records per entity type. Types left out start empty.
    #[serde(default, skip_serializing_if = "RootPayload::is_empty")]
    pub initial_state: RootPayload,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            entity_types: vec![
                EntitySchema::new("Transaction"),
                EntitySchema::new("CardTransaction"),
            ],
            initial_state: RootPayload::new(),
        }
    }
}

impl CacheConfig {
    /// Reads and validates a config file.
    pub fn from_path(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| StoreError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded cache config");
        Self::from_json_str(&json)
    }

    /// Parses and validates a config document.
    pub fn from_json_str(json: &str) -> StoreResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that type names are non-empty and unique, that initial state
    /// only seeds registered types, and that seeded records pass their
    /// schema's identity check.
    pub fn validate(&self) -> StoreResult<()> {
        if self.entity_types.is_empty() {
            return Err(StoreError::InvalidConfig("no entity types configured".into()));
        }

        let mut seen = HashSet::new();
        for schema in &self.entity_types {
            if schema.entity_type.is_empty() {
                return Err(StoreError::InvalidConfig("entity type name is empty".into()));
            }
            if !seen.insert(schema.entity_type.as_str()) {
                return Err(StoreError::DuplicateEntityType(schema.entity_type.clone()));
            }
        }

        if let Some(unknown) = self.initial_state.entity_types().find(|t| !seen.contains(t)) {
            return Err(StoreError::UnknownEntityType(unknown.to_string()));
        }

        for schema in &self.entity_types {
            let Some(slice) = self.initial_state.slice(&schema.entity_type) else {
                continue;
            };
            for (key, record) in slice {
                schema.check_identity(key, record).map_err(|reason| {
                    StoreError::InvalidConfig(format!(
                        "initial record `{key}` of entity type `{}`: {reason}",
                        schema.entity_type
                    ))
                })?;
            }
        }
        Ok(())
    }

    /// One cache per configured schema, seeded from `initial_state`.
    ///
    /// Handlers can be attached to the returned caches before registration.
    pub fn caches(&self) -> StoreResult<Vec<EntityCache>> {
        self.validate()?;
        Ok(self
            .entity_types
            .iter()
            .map(|schema| {
                let initial = self
                    .initial_state
                    .slice(&schema.entity_type)
                    .cloned()
                    .map(EntityStore::from_slice)
                    .unwrap_or_default();
                EntityCache::new(schema.clone()).with_initial(initial)
            })
            .collect())
    }
}
