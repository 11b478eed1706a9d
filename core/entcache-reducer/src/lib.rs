//! Generic per-entity-type reducer.
//!
//! One [`EntityCache`] is instantiated per entity type of interest. It folds
//! fetch-succeeded actions into its [`EntityStore`] and hands back the
//! identical `Arc` for everything else, so consumers can detect "nothing
//! changed" with a pointer comparison.

mod cache;
mod error;

pub use cache::EntityCache;
pub use error::{CacheError, CacheResult};

use entcache_model::EntityStore;
use entcache_types::Action;
use std::sync::Arc;

/// A reducer owning one slice of the root snapshot.
///
/// Implementations must be pure: `apply` may not mutate `current`, perform
/// I/O, or depend on anything but its arguments and static configuration.
pub trait Reducer: Send + Sync {
    /// Snapshot key this reducer is responsible for.
    fn entity_type(&self) -> &str;

    /// Store the slice starts out with.
    fn initial_state(&self) -> Arc<EntityStore>;

    /// Produces the next store. Returns `current` itself when the action
    /// leaves the store unchanged.
    fn apply(&self, current: &Arc<EntityStore>, action: &Action) -> CacheResult<Arc<EntityStore>>;
}
