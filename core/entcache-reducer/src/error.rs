//! Error types for the reducer.

use thiserror::Error;

/// Result type for reducer operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors that can occur while applying an action.
///
/// Unrecognized actions and missing slices are not errors.
#[derive(Debug, Error)]
pub enum CacheError {
    /// A record in the incoming slice failed validation. Nothing from the
    /// slice was merged.
    #[error("invalid record `{key}` of entity type `{entity_type}`: {reason}")]
    Validation {
        entity_type: String,
        key: String,
        reason: String,
    },
}

impl CacheError {
    pub(crate) fn validation(entity_type: &str, key: &impl ToString, reason: impl Into<String>) -> Self {
        Self::Validation {
            entity_type: entity_type.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
