use crate::shallow_merge;
use entcache_types::{EntityKey, EntityRecord};

/// Optional per-type hooks for caches that need more than the built-in
/// merge strategies.
///
/// Most entity types do NOT need one. Implement it for:
/// - Input validation (e.g., rejecting records with a negative amount)
/// - Custom merge (`MergeStrategy::Custom`)
pub trait EntityHandler: Send + Sync {
    /// Validate an incoming record before it is merged.
    /// Return `Err(message)` to reject the whole slice.
    fn validate(&self, key: &EntityKey, record: &EntityRecord) -> Result<(), String> {
        let _ = (key, record);
        Ok(())
    }

    /// Custom merge for `MergeStrategy::Custom`.
    /// Default implementation is the shallow field merge.
    fn merge(&self, existing: &EntityRecord, incoming: &EntityRecord) -> EntityRecord {
        shallow_merge(existing, incoming)
    }
}
