//! The dispatcher owning the current snapshot.

use crate::{CacheConfig, RootReducer, Snapshot, StoreResult};
use entcache_types::Action;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Owns the current [`Snapshot`] and advances it one action at a time.
///
/// Dispatch needs `&mut self`, so there is exactly one writer. Readers hold
/// [`watch::Receiver`]s and only ever observe whole snapshots.
#[derive(Debug)]
pub struct Store {
    root: RootReducer,
    current: watch::Sender<Arc<Snapshot>>,
}

impl Store {
    /// Creates a store at the root reducer's initial snapshot.
    pub fn new(root: RootReducer) -> Self {
        let initial = Arc::new(root.initial_snapshot());
        let (current, _) = watch::channel(initial);
        Self { root, current }
    }

    /// Builds the root reducer from `config` and wraps it in a store.
    pub fn from_config(config: &CacheConfig) -> StoreResult<Self> {
        Ok(Self::new(RootReducer::from_config(config)?))
    }

    pub fn root(&self) -> &RootReducer {
        &self.root
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.borrow().clone()
    }

    /// Returns a receiver that is notified whenever a dispatch changes the
    /// snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.current.subscribe()
    }

    /// Applies `action` and publishes the result.
    ///
    /// On error the current snapshot is kept and nothing is published.
    pub fn dispatch(&mut self, action: &Action) -> StoreResult<Arc<Snapshot>> {
        let current = self.snapshot();
        let next = match self.root.reduce(&current, action) {
            Ok(next) => next,
            Err(e) => {
                warn!(kind = %action.kind(), error = %e, "action rejected");
                return Err(e);
            }
        };

        if Arc::ptr_eq(&current, &next) {
            debug!(kind = %action.kind(), "action left snapshot unchanged");
        } else {
            self.current.send_replace(Arc::clone(&next));
        }
        Ok(next)
    }

    /// Decodes one JSON action and dispatches it.
    pub fn dispatch_json(&mut self, json: &str) -> StoreResult<Arc<Snapshot>> {
        let action = Action::from_json(json)?;
        self.dispatch(&action)
    }
}
