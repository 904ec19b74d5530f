//! The modal orchestration service
//!
//! [`ModalManager`] owns the four shared structures -- registry, mount
//! tracker, store, and the two pending-operation maps -- behind one
//! explicit, cheaply clonable instance. Construct it once at application
//! start and pass clones to every consumer; there are no module globals.
//!
//! Dispatch is synchronous and atomic: each operation holds the relevant
//! lock only for the duration of its own mutation, and the reducer runs
//! inside the store's `send_if_modified`. Suspension happens only at the
//! future layer, when a caller awaits a show or hide future. No timeout is
//! built in; callers that need one race the future against
//! `tokio::time::timeout`.
//!
//! # Per-key state machine
//!
//! ```text
//! NoState --show (no host)--> DelayedVisible --host attaches--> Visible
//! NoState --show (host mounted)--> Visible
//! Visible --hide--> Hidden --show--> Visible (args replaced)
//! any state --remove--> NoState (registry descriptor untouched)
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tokio::sync::watch;

use modalflow_core::prelude::*;
use modalflow_core::{ModalAction, ModalFlags, ModalKey, ModalState, StoreSnapshot};

use crate::descriptor::{ModalComponent, ModalDescriptor};
use crate::handle::ModalHandle;
use crate::mount::MountTracker;
use crate::pending::{PendingOps, SettleFuture};
use crate::registry::ModalRegistry;
use crate::store::{ModalStore, StoreBackend};

struct ManagerInner {
    registry: Mutex<ModalRegistry>,
    mounts: Mutex<MountTracker>,
    store: Arc<dyn StoreBackend>,
    show_ops: Mutex<PendingOps>,
    hide_ops: Mutex<PendingOps>,
}

/// The orchestrator. Clones share the same underlying state.
#[derive(Clone)]
pub struct ModalManager {
    inner: Arc<ManagerInner>,
}

impl Default for ModalManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ModalManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalManager")
            .field("registered", &lock(&self.inner.registry).len())
            .field("pending_shows", &lock(&self.inner.show_ops).len())
            .field("pending_hides", &lock(&self.inner.hide_ops).len())
            .finish()
    }
}

// Short critical sections only; a poisoned lock just means a panicking
// test observer, so we keep going with the inner value.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ModalManager {
    /// Manager backed by the built-in watch-channel store
    pub fn new() -> Self {
        Self::with_store(Arc::new(ModalStore::new()))
    }

    /// Manager backed by a host-supplied store
    pub fn with_store(store: Arc<dyn StoreBackend>) -> Self {
        Self {
            inner: Arc::new(ManagerInner {
                registry: Mutex::new(ModalRegistry::new()),
                mounts: Mutex::new(MountTracker::new()),
                store,
                show_ops: Mutex::new(PendingOps::new()),
                hide_ops: Mutex::new(PendingOps::new()),
            }),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Registry
    // ─────────────────────────────────────────────────────────────

    /// Register a descriptor and return its key.
    ///
    /// Idempotent: a second registration under the same key refreshes the
    /// default args and keeps the original component.
    pub fn register(&self, descriptor: ModalDescriptor) -> ModalKey {
        lock(&self.inner.registry).register(descriptor)
    }

    /// Delete a descriptor. Store state and pending operations for the
    /// key are untouched.
    pub fn unregister(&self, key: &ModalKey) -> bool {
        lock(&self.inner.registry).unregister(key)
    }

    pub fn is_registered(&self, key: &ModalKey) -> bool {
        lock(&self.inner.registry).contains(key)
    }

    pub(crate) fn resolve_renderer(&self, key: &ModalKey) -> Option<Arc<dyn ModalComponent>> {
        lock(&self.inner.registry).resolve_renderer(key)
    }

    pub(crate) fn default_args(&self, key: &ModalKey) -> Option<Value> {
        lock(&self.inner.registry).default_args(key)
    }

    // ─────────────────────────────────────────────────────────────
    // Orchestration
    // ─────────────────────────────────────────────────────────────

    /// Show a modal and return the future of its *result*.
    ///
    /// If no host is mounted for the key yet, the state is created as
    /// delay-visible and flips to visible once a host attaches. Concurrent
    /// shows on one key before settlement return the same shared future.
    pub fn show(&self, key: &ModalKey, args: impl Into<Option<Value>>) -> SettleFuture {
        let mounted = lock(&self.inner.mounts).is_mounted(key);
        debug!("show {} (mounted: {})", key, mounted);
        self.inner.store.dispatch(ModalAction::Show {
            key: key.clone(),
            args: args.into(),
            mounted,
        });
        lock(&self.inner.show_ops).obtain(key)
    }

    /// Show via an inline descriptor, registering it on the fly
    pub fn show_with(
        &self,
        descriptor: ModalDescriptor,
        args: impl Into<Option<Value>>,
    ) -> SettleFuture {
        let key = self.register(descriptor);
        self.show(&key, args)
    }

    /// Hide a modal and return the future of its *close* completion.
    ///
    /// The close future settles when some party calls [`resolve_hide`],
    /// typically the host after its exit transition. Hiding does not settle
    /// the show future: a pending result can still be resolved afterwards.
    ///
    /// [`resolve_hide`]: Self::resolve_hide
    pub fn hide(&self, key: &ModalKey) -> SettleFuture {
        debug!("hide {}", key);
        self.inner
            .store
            .dispatch(ModalAction::Hide { key: key.clone() });
        lock(&self.inner.hide_ops).obtain(key)
    }

    /// Delete the modal's state entirely and discard both pending
    /// operations without settling them; anyone still awaiting observes
    /// `Err(Error::Abandoned)`. The registry descriptor is untouched.
    pub fn remove(&self, key: &ModalKey) {
        debug!("remove {}", key);
        self.inner
            .store
            .dispatch(ModalAction::Remove { key: key.clone() });
        if lock(&self.inner.show_ops).discard(key) {
            warn!("removed {} with an unsettled show future", key);
        }
        lock(&self.inner.hide_ops).discard(key);
    }

    /// Settle the pending show future with a result value.
    /// A second resolve after settlement is a no-op.
    pub fn resolve(&self, key: &ModalKey, value: impl Into<Option<Value>>) {
        let value = value.into().unwrap_or(Value::Null);
        if lock(&self.inner.show_ops).settle(key, Ok(value)) {
            debug!("resolved {}", key);
        }
    }

    /// Settle the pending show future with a rejection. The payload is
    /// opaque and propagates to the awaiting caller exactly as given.
    pub fn reject(&self, key: &ModalKey, value: impl Into<Option<Value>>) {
        let payload = value.into().unwrap_or(Value::Null);
        if lock(&self.inner.show_ops).settle(key, Err(Error::Rejected(payload))) {
            debug!("rejected {}", key);
        }
    }

    /// Settle the pending hide future, signalling that the close process
    /// (e.g. an exit animation) finished.
    pub fn resolve_hide(&self, key: &ModalKey, value: impl Into<Option<Value>>) {
        let value = value.into().unwrap_or(Value::Null);
        if lock(&self.inner.hide_ops).settle(key, Ok(value)) {
            debug!("hide completed for {}", key);
        }
    }

    /// Shallow-merge flag overrides (e.g. `keep_mounted`) into the entry
    pub fn set_flags(&self, key: &ModalKey, flags: ModalFlags) {
        self.inner.store.dispatch(ModalAction::SetFlags {
            key: key.clone(),
            flags,
        });
    }

    // ─────────────────────────────────────────────────────────────
    // Store access
    // ─────────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> StoreSnapshot {
        self.inner.store.snapshot()
    }

    pub fn state_of(&self, key: &ModalKey) -> Option<ModalState> {
        self.inner.store.snapshot().get(key).cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.inner.store.subscribe()
    }

    // ─────────────────────────────────────────────────────────────
    // Subscription interface
    // ─────────────────────────────────────────────────────────────

    /// Live-updating handle bound to one key
    pub fn use_modal(&self, key: impl Into<ModalKey>) -> ModalHandle {
        ModalHandle::new(self, key.into())
    }

    /// Handle from a descriptor, registering it lazily
    pub fn use_modal_with(&self, descriptor: ModalDescriptor) -> ModalHandle {
        let key = self.register(descriptor);
        ModalHandle::new(self, key)
    }

    // ─────────────────────────────────────────────────────────────
    // Mount lifecycle (called by ModalHandle attach/detach)
    // ─────────────────────────────────────────────────────────────

    pub(crate) fn mark_mounted(&self, key: &ModalKey) {
        lock(&self.inner.mounts).mark_mounted(key);
        // resolve the pre-mount race: a show that arrived before any host
        // flips to visible now, with the args it was shown with
        if let Some(state) = self.state_of(key) {
            if state.delay_visible {
                trace!("host attached for {}, promoting delayed show", key);
                self.inner.store.dispatch(ModalAction::Show {
                    key: key.clone(),
                    args: state.args,
                    mounted: true,
                });
            }
        }
    }

    pub(crate) fn unmark_mounted(&self, key: &ModalKey) {
        lock(&self.inner.mounts).unmark_mounted(key);
    }

    pub(crate) fn is_mounted(&self, key: &ModalKey) -> bool {
        lock(&self.inner.mounts).is_mounted(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;
    use serde_json::json;

    fn noop_descriptor(name: &str) -> ModalDescriptor {
        ModalDescriptor::new(name, Arc::new(|_handle: ModalHandle, _args| {}))
    }

    #[tokio::test]
    async fn test_show_then_resolve_settles_future() {
        let manager = ModalManager::new();
        let key = ModalKey::named("a");
        manager.mark_mounted(&key);

        let future = manager.show(&key, json!({"x": 1}));
        assert!(future.clone().now_or_never().is_none());

        manager.resolve(&key, json!({"y": 2}));
        assert_eq!(future.await, Ok(json!({"y": 2})));

        // second resolve after settlement must not panic and must not
        // create a new pending operation
        manager.resolve(&key, json!({"y": 3}));
        assert!(!lock(&manager.inner.show_ops).contains(&key));
    }

    #[tokio::test]
    async fn test_concurrent_shows_collapse_to_one_future() {
        let manager = ModalManager::new();
        let key = ModalKey::named("a");

        let f1 = manager.show(&key, None);
        let f2 = manager.show(&key, None);
        assert!(f1.ptr_eq(&f2));

        let other = manager.show(&ModalKey::named("b"), None);
        assert!(!f1.ptr_eq(&other));
    }

    #[tokio::test]
    async fn test_hide_does_not_settle_show_future() {
        let manager = ModalManager::new();
        let key = ModalKey::named("a");
        manager.mark_mounted(&key);

        let show_future = manager.show(&key, json!({"x": 1}));
        let _hide_future = manager.hide(&key);

        let state = manager.state_of(&key).expect("entry retained");
        assert!(!state.visible);
        assert_eq!(state.args, Some(json!({"x": 1})));
        assert!(show_future.clone().now_or_never().is_none());

        // a result can still be delivered after hide
        manager.resolve(&key, json!({"late": true}));
        assert_eq!(show_future.await, Ok(json!({"late": true})));
    }

    #[tokio::test]
    async fn test_hide_future_settles_on_resolve_hide() {
        let manager = ModalManager::new();
        let key = ModalKey::named("a");
        manager.mark_mounted(&key);

        let _ = manager.show(&key, None);
        let hide_future = manager.hide(&key);
        assert!(hide_future.clone().now_or_never().is_none());

        manager.resolve_hide(&key, None);
        assert_eq!(hide_future.await, Ok(Value::Null));
    }

    #[tokio::test]
    async fn test_reshow_after_hide_updates_args() {
        let manager = ModalManager::new();
        let key = ModalKey::named("a");
        manager.mark_mounted(&key);

        let _ = manager.show(&key, json!({"x": 1}));
        let _ = manager.hide(&key);
        let _ = manager.show(&key, json!({"z": 3}));

        let state = manager.state_of(&key).expect("entry exists");
        assert!(state.visible);
        assert_eq!(state.args, Some(json!({"z": 3})));
    }

    #[tokio::test]
    async fn test_remove_clears_state_and_abandons_futures() {
        let manager = ModalManager::new();
        let key = ModalKey::named("a");
        manager.mark_mounted(&key);

        let show_future = manager.show(&key, json!({"x": 1}));
        let hide_future = manager.hide(&key);
        manager.remove(&key);

        assert!(manager.state_of(&key).is_none());
        assert_eq!(show_future.await, Err(Error::Abandoned));
        assert_eq!(hide_future.await, Err(Error::Abandoned));
    }

    #[tokio::test]
    async fn test_delayed_visibility_flips_on_mount() {
        let manager = ModalManager::new();
        let key = ModalKey::named("a");

        let _ = manager.show(&key, json!({"x": 1}));
        let state = manager.state_of(&key).expect("entry exists");
        assert!(!state.visible);
        assert!(state.delay_visible);

        manager.mark_mounted(&key);
        let state = manager.state_of(&key).expect("entry exists");
        assert!(state.visible);
        assert!(!state.delay_visible);
        assert_eq!(state.args, Some(json!({"x": 1})));
    }

    #[tokio::test]
    async fn test_reject_propagates_payload() {
        let manager = ModalManager::new();
        let key = ModalKey::named("a");

        let future = manager.show(&key, None);
        manager.reject(&key, json!({"cancelled": true}));
        assert_eq!(future.await, Err(Error::Rejected(json!({"cancelled": true}))));
    }

    #[tokio::test]
    async fn test_show_with_registers_inline_descriptor() {
        let manager = ModalManager::new();
        let descriptor = noop_descriptor("inline");
        let key = descriptor.key().clone();

        let _future = manager.show_with(descriptor, None);
        assert!(manager.is_registered(&key));
        assert!(manager.state_of(&key).is_some());
    }

    #[tokio::test]
    async fn test_unregister_leaves_state_and_pending_ops() {
        let manager = ModalManager::new();
        let key = manager.register(noop_descriptor("a"));
        manager.mark_mounted(&key);

        let future = manager.show(&key, None);
        manager.unregister(&key);

        assert!(!manager.is_registered(&key));
        assert!(manager.state_of(&key).is_some());
        manager.resolve(&key, json!("still works"));
        assert_eq!(future.await, Ok(json!("still works")));
    }
}
