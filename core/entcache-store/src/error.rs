//! Error types for the store layer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while configuring the store or dispatching to it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Two reducers claim the same snapshot key.
    #[error("entity type `{0}` is registered more than once")]
    DuplicateEntityType(String),

    /// Initial state names a type no reducer is registered for.
    #[error("entity type `{0}` is not registered")]
    UnknownEntityType(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A reducer rejected the action. The snapshot was not changed.
    #[error(transparent)]
    Cache(#[from] entcache_reducer::CacheError),

    /// The action could not be decoded.
    #[error(transparent)]
    Types(#[from] entcache_types::Error),
}
