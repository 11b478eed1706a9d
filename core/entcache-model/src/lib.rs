//! Entity store model for the normalized entity cache.
//!
//! Defines the types every cache instance is built from:
//! - [`EntityStore`]: the immutable per-type map from key to record
//! - [`EntitySchema`]: declares an entity type's name, identity field and merge strategy
//! - [`MergeStrategy`]: how an incoming record is combined with the one already stored
//! - [`EntityHandler`]: optional trait for custom validation/merge logic

mod handler;
mod merge;
mod schema;
mod store;

pub use handler::EntityHandler;
pub use merge::{deep_merge, shallow_merge};
pub use schema::{EntitySchema, MergeStrategy};
pub use store::EntityStore;
