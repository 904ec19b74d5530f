//! The subscription interface: a live handle bound to one modal
//!
//! A [`ModalHandle`] is what a host component works with: derived state
//! accessors backed by the store's watch channel, operations pre-bound to
//! the handle's key, and the attach/detach lifecycle that feeds the mount
//! tracker.

use serde_json::Value;
use tokio::sync::watch;

use modalflow_core::{ModalFlags, ModalKey, ModalState, StoreSnapshot};

use crate::descriptor::ModalDescriptor;
use crate::manager::ModalManager;
use crate::pending::SettleFuture;

/// Live-updating handle for one modal identity.
#[derive(Clone)]
pub struct ModalHandle {
    key: ModalKey,
    manager: ModalManager,
    rx: watch::Receiver<StoreSnapshot>,
}

impl ModalHandle {
    pub(crate) fn new(manager: &ModalManager, key: ModalKey) -> Self {
        Self {
            key,
            manager: manager.clone(),
            rx: manager.subscribe(),
        }
    }

    /// Handle from a descriptor, registering it lazily on the manager
    pub fn from_descriptor(manager: &ModalManager, descriptor: ModalDescriptor) -> Self {
        manager.use_modal_with(descriptor)
    }

    pub fn key(&self) -> &ModalKey {
        &self.key
    }

    // ─────────────────────────────────────────────────────────────
    // Derived state
    // ─────────────────────────────────────────────────────────────

    /// Full state entry, if the modal has one
    pub fn state(&self) -> Option<ModalState> {
        self.rx.borrow().get(&self.key).cloned()
    }

    pub fn visible(&self) -> bool {
        self.rx
            .borrow()
            .get(&self.key)
            .is_some_and(|s| s.visible)
    }

    pub fn delay_visible(&self) -> bool {
        self.rx
            .borrow()
            .get(&self.key)
            .is_some_and(|s| s.delay_visible)
    }

    pub fn keep_mounted(&self) -> bool {
        self.rx
            .borrow()
            .get(&self.key)
            .is_some_and(|s| s.keep_mounted)
    }

    pub fn args(&self) -> Option<Value> {
        self.rx.borrow().get(&self.key).and_then(|s| s.args.clone())
    }

    /// Wait for the next store transition. Returns false when the store
    /// is gone (manager dropped).
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    // ─────────────────────────────────────────────────────────────
    // Bound operations
    // ─────────────────────────────────────────────────────────────

    pub fn show(&self, args: impl Into<Option<Value>>) -> SettleFuture {
        self.manager.show(&self.key, args)
    }

    pub fn hide(&self) -> SettleFuture {
        self.manager.hide(&self.key)
    }

    pub fn remove(&self) {
        self.manager.remove(&self.key)
    }

    pub fn resolve(&self, value: impl Into<Option<Value>>) {
        self.manager.resolve(&self.key, value)
    }

    pub fn reject(&self, value: impl Into<Option<Value>>) {
        self.manager.reject(&self.key, value)
    }

    pub fn resolve_hide(&self, value: impl Into<Option<Value>>) {
        self.manager.resolve_hide(&self.key, value)
    }

    pub fn set_flags(&self, flags: ModalFlags) {
        self.manager.set_flags(&self.key, flags)
    }

    // ─────────────────────────────────────────────────────────────
    // Mount lifecycle
    // ─────────────────────────────────────────────────────────────

    /// Mark this key mounted for the lifetime of the returned guard.
    ///
    /// Attaching promotes a delay-visible entry to visible with its stored
    /// args. Dropping the guard (or calling [`detach`]) unmarks the key.
    ///
    /// [`detach`]: Self::detach
    pub fn attach(&self) -> MountGuard {
        self.manager.mark_mounted(&self.key);
        MountGuard {
            key: self.key.clone(),
            manager: self.manager.clone(),
        }
    }

    /// Explicit detach; unmarking is idempotent, so this is safe to call
    /// even while a guard is still alive
    pub fn detach(&self) {
        self.manager.unmark_mounted(&self.key);
    }
}

/// RAII guard for a host attachment.
pub struct MountGuard {
    key: ModalKey,
    manager: ModalManager,
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        self.manager.unmark_mounted(&self.key);
    }
}
