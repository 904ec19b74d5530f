//! Built-in modal store and the external-store seam
//!
//! The store owns the current [`StoreSnapshot`] behind a `watch` channel.
//! Dispatch runs the pure reducer inside `send_if_modified`, so subscribers
//! are only woken when a dispatch actually changed state.
//!
//! Hosts that keep modal state inside their own global-state mechanism can
//! implement [`StoreBackend`] themselves and hand it to
//! `ModalManager::with_store`; the rest of the orchestrator never assumes
//! the built-in store.

use tokio::sync::watch;

use modalflow_core::prelude::*;
use modalflow_core::{reduce, ModalAction, StoreSnapshot};

/// The seam between the orchestrator and whoever owns modal state.
pub trait StoreBackend: Send + Sync {
    /// Apply one action. Must be atomic with respect to other dispatches.
    fn dispatch(&self, action: ModalAction);

    /// Current state snapshot
    fn snapshot(&self) -> StoreSnapshot;

    /// Live-updating view of the state
    fn subscribe(&self) -> watch::Receiver<StoreSnapshot>;
}

/// Built-in watch-channel store.
pub struct ModalStore {
    tx: watch::Sender<StoreSnapshot>,
}

impl ModalStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(StoreSnapshot::new());
        Self { tx }
    }
}

impl Default for ModalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreBackend for ModalStore {
    fn dispatch(&self, action: ModalAction) {
        let changed = self.tx.send_if_modified(|state| match reduce(state, &action) {
            Some(next) => {
                *state = next;
                true
            }
            None => false,
        });
        trace!(
            "dispatch {} for {} (changed: {})",
            action.description(),
            action.key(),
            changed
        );
    }

    fn snapshot(&self) -> StoreSnapshot {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.tx.subscribe()
    }
}
