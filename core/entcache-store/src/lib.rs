//! Composition layer for the normalized entity cache.
//!
//! - [`RootReducer`] runs every registered per-type reducer on each action
//!   and assembles their stores into one [`Snapshot`]. It is pure.
//! - [`Store`] owns the current snapshot, threads it through the root
//!   reducer on dispatch and publishes whole snapshots to subscribers.
//! - [`CacheConfig`] declares the registered entity types and their
//!   initial state.

mod config;
mod error;
mod root;
mod snapshot;
mod store;

pub use config::CacheConfig;
pub use error::{StoreError, StoreResult};
pub use root::{RootReducer, RootReducerBuilder};
pub use snapshot::Snapshot;
pub use store::Store;
