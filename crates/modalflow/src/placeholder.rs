//! Placeholder rendering pass
//!
//! The placeholder is the integration point for the host's rendering
//! layer: one pass walks every key with live state, resolves its
//! registered component, and instantiates it with the merged args and a
//! live handle. How (and how often) the host runs passes is its own
//! business -- poll, subscribe to the store, or hook into its reactive
//! binding.

use modalflow_core::prelude::*;
use modalflow_core::{merge_args, ModalKey};

use crate::manager::ModalManager;

pub struct ModalPlaceholder {
    manager: ModalManager,
}

impl ModalPlaceholder {
    pub fn new(manager: &ModalManager) -> Self {
        Self {
            manager: manager.clone(),
        }
    }

    /// Instantiate every modal with live state; returns the keys that were
    /// handed to a component, in deterministic (sorted) order.
    ///
    /// A live key with no registered component is skipped with a warning
    /// rather than an error, so one misconfigured modal cannot take down
    /// the whole rendering surface.
    pub fn render_pass(&self) -> Vec<ModalKey> {
        let snapshot = self.manager.snapshot();
        let mut instantiated = Vec::new();

        for key in snapshot.sorted_keys() {
            let Some(component) = self.manager.resolve_renderer(&key) else {
                if !self.manager.is_mounted(&key) {
                    warn!(
                        "modal {} has live state but no registered component; skipping",
                        key
                    );
                }
                continue;
            };

            let state_args = snapshot.get(&key).and_then(|s| s.args.clone());
            let merged = merge_args(self.manager.default_args(&key).as_ref(), state_args.as_ref());
            component.instantiate(self.manager.use_modal(&key), merged);
            instantiated.push(key);
        }

        instantiated
    }
}
